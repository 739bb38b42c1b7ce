use thiserror::Error;

use fest_core::Stamp;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("duplicate event at {at} in {venue:?}; keeping the first")]
    DuplicateEvent { at: Stamp, venue: String },

    #[error("unknown show {0:?}")]
    UnknownShow(String),

    #[error("unknown venue {0:?}")]
    UnknownVenue(String),

    #[error("no event at {at} in {venue:?}")]
    UnknownEvent { at: Stamp, venue: String },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
