//! `fest-core` — foundational types for the festival schedule planner.
//!
//! Every other `fest-*` crate depends on this one.  It has no `fest-*`
//! dependencies and few external ones (`chrono`, `thiserror`, `tracing`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`ids`]        | `ShowId`, `VenueId`, `EventId`                         |
//! | [`time`]       | `Stamp` (absolute wall-clock seconds) and formatting   |
//! | [`when`]       | `When`: free-form date/time parsing with a running date |
//! | [`settings`]   | `Settings` store, `SettingsSnapshot`, key constants    |
//! | [`error`]      | `FestError`, `FestResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Stamp`, and        |
//! |         | `SettingsSnapshot`.                                        |

pub mod error;
pub mod ids;
pub mod settings;
pub mod time;
pub mod when;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FestError, FestResult};
pub use ids::{EventId, ShowId, VenueId};
pub use settings::{Settings, SettingsSnapshot};
pub use time::Stamp;
pub use when::When;
