//! `fest-schedule` — the show/event model and what runs over a user's picks.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`model`]    | `Show`, `Event`, `Leg`, `Model` (arenas + name indexes)   |
//! | [`conflict`] | `compute_conflicts` — travel, spare time, conflict flags  |
//! | [`stats`]    | `Statistics`                                              |
//! | [`form`]     | form control names and `apply_form_selections`            |
//! | [`error`]    | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Conflict model (summary)
//!
//! Selected events are walked in `(time, show, venue)` order.  For each
//! adjacent pair `prev → cur`:
//!
//! ```text
//! available_at = prev.start + prev.duration + travel(prev.venue → cur.venue) + lineup
//! spare        = cur.start - available_at          (stored on prev)
//! conflict     = cur.start < available_at           (flagged on cur)
//! ```
//!
//! Only adjacent pairs are compared.  A long show overlapping several later
//! picks flags just the first of them.

pub mod conflict;
pub mod error;
pub mod form;
pub mod model;
pub mod stats;


pub use conflict::compute_conflicts;
pub use error::{ScheduleError, ScheduleResult};
pub use form::{apply_form_selections, event_key, show_key, ApplyOutcome, FormKey, FormPairs, FormSummary};
pub use model::{Event, Leg, Model, Show};
pub use stats::Statistics;
