//! Venue-graph error type.

use thiserror::Error;

use fest_core::VenueId;

/// Errors produced by `fest-venue`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VenueError {
    #[error("no walking path from {from} to {to}")]
    NoRoute { from: VenueId, to: VenueId },

    #[error("venue {0} not found in graph")]
    VenueNotFound(VenueId),

    #[error("no venue named {0:?}")]
    UnknownVenue(String),
}

pub type VenueResult<T> = Result<T, VenueError>;
