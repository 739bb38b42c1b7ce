//! Observer trait for reporting on a planner run.

use fest_codec::Diagnostic;
use fest_core::Settings;
use fest_schedule::{ApplyOutcome, Model, Statistics};

/// Callbacks invoked by [`Planner::run`][crate::Planner::run] as each stage
/// completes.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — diagnostic printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl PlanObserver for Printer {
///     fn on_diagnostic(&mut self, diagnostic: &Diagnostic) {
///         eprintln!("skipped {diagnostic}");
///     }
/// }
/// ```
pub trait PlanObserver {
    /// Called once per skipped line, in line order, during decoding.
    fn on_diagnostic(&mut self, _diagnostic: &Diagnostic) {}

    /// Called after decoding, overrides and phantom edge generation.
    fn on_decoded(&mut self, _model: &Model, _settings: &Settings) {}

    /// Called if a form was supplied, with what became of it.
    fn on_form(&mut self, _outcome: &ApplyOutcome) {}

    /// Called after conflicts and statistics are computed.
    fn on_statistics(&mut self, _statistics: &Statistics, _model: &Model) {}
}

/// A [`PlanObserver`] that does nothing.
pub struct NoopObserver;

impl PlanObserver for NoopObserver {}
