//! Error types for fest-codec.

use thiserror::Error;

use fest_core::FestError;
use fest_schedule::ScheduleError;

/// Why one line of state text was skipped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LineError {
    #[error("unknown keyword {0:?}")]
    UnknownKeyword(String),

    #[error("{keyword} needs at least {expected} fields, found {found}")]
    TooFewFields { keyword: String, expected: usize, found: usize },

    #[error("{keyword}: {field} is empty")]
    EmptyField { keyword: String, field: &'static str },

    #[error("{field} is not a valid number: {value:?}")]
    BadNumber { field: &'static str, value: String },

    #[error("not a date/time: {0:?}")]
    BadDate(String),

    #[error(transparent)]
    Time(#[from] FestError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("input longer than {limit} bytes; the rest was dropped")]
    Truncated { limit: usize },
}

/// A skipped line and the reason.  `line` is 1-based.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("line {line}: {reason}")]
pub struct Diagnostic {
    pub line:   usize,
    pub reason: LineError,
}

/// Failures of the encoder and the itinerary writer.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Time(#[from] FestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, CodecError>`.
pub type CodecResult<T> = Result<T, CodecError>;
