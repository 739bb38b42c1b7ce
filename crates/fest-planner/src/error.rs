use fest_codec::CodecError;
use fest_core::FestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("planner configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Setting(#[from] FestError),

    #[error("encoding failed: {0}")]
    Codec(#[from] CodecError),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
