//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `FestError` as one
//! variant via `#[from]` where they need to surface core failures.

use thiserror::Error;

/// The base error type for `fest-core` and a common building block for the
/// other `fest-*` crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FestError {
    #[error("time-of-day given with no preceding date line")]
    MissingDate,

    #[error("timestamp {0} is outside the representable calendar range")]
    TimeOutOfRange(i64),

    #[error("setting {key} has invalid value {value:?}")]
    InvalidSetting { key: String, value: String },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `fest-*` crates.
pub type FestResult<T> = Result<T, FestError>;
