//! Schedule-wide counters.

use std::fmt;

use fest_core::time::duration_text;

/// Aggregates over the user's selections.  Recomputed from scratch by every
/// [`compute_conflicts`](crate::compute_conflicts) call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Selected events that start before the previous pick's availability.
    pub conflicts: u32,
    pub scheduled_events: u32,
    /// Shows selected more than once.
    pub redundant_shows: u32,
    /// Shows not selected at all.
    pub unseen_shows: u32,
    pub unseen_favourites: u32,
    pub seconds_watched: i64,
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} scheduled ({} watching), {} conflicts, {} redundant, {} unseen ({} favourites)",
            self.scheduled_events,
            duration_text(self.seconds_watched),
            self.conflicts,
            self.redundant_shows,
            self.unseen_shows,
            self.unseen_favourites,
        )
    }
}
