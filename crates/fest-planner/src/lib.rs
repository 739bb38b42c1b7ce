//! `fest-planner` — one request, start to finish.
//!
//! # Pipeline
//!
//! ```text
//! ① Decode    — state text → Model + diagnostics; Setting lines update
//!               the settings store as they are read.
//! ② Overrides — caller-supplied settings replace decoded ones.
//! ③ Phantoms  — reverse edges for one-way TravelTime lines.
//! ④ Form      — posted selections merged if the token is fresh.
//! ⑤ Conflicts — legs, conflict flags, statistics.
//! ⑥ Touch     — LastUpdate advanced so the next page gets a new token.
//! ⑦ Encode    — canonical state text for the next round trip.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fest_planner::{NoopObserver, PlannerBuilder};
//!
//! let outcome = PlannerBuilder::new(&text)
//!     .form(pairs, token)
//!     .now(now)
//!     .build()?
//!     .run(&mut NoopObserver)?;
//! println!("{}", outcome.statistics);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod planner;

#[cfg(test)]
mod tests;

pub use builder::PlannerBuilder;
pub use error::{PlannerError, PlannerResult};
pub use observer::{NoopObserver, PlanObserver};
pub use planner::{PlanOutcome, Planner};
