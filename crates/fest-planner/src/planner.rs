//! The request pipeline.

use tracing::{debug, info};

use fest_codec::{DecodeOptions, Diagnostic, decode_with, encode};
use fest_core::settings::keys;
use fest_core::{Settings, Stamp};
use fest_schedule::{ApplyOutcome, FormPairs, Model, Statistics, apply_form_selections, compute_conflicts};
use fest_venue::Router;

use crate::{PlanObserver, PlannerResult};

/// Everything a request produces.
#[derive(Debug)]
pub struct PlanOutcome {
    /// The evaluated model: legs and conflict flags are filled in.
    pub model:         Model,
    /// The settings store after decoding, overrides, form and touch.
    pub settings:      Settings,
    pub statistics:    Statistics,
    pub diagnostics:   Vec<Diagnostic>,
    /// `None` if no form was supplied.
    pub form:          Option<ApplyOutcome>,
    pub phantom_edges: usize,
    /// Canonical state text to hand back to the client.
    pub text:          String,
}

/// A configured, single-use request.  Build with
/// [`PlannerBuilder`](crate::PlannerBuilder).
pub struct Planner<'t, R: Router> {
    pub(crate) text:      &'t str,
    pub(crate) settings:  Settings,
    pub(crate) overrides: Vec<(String, String)>,
    pub(crate) form:      Option<(FormPairs, i64)>,
    pub(crate) now:       Option<Stamp>,
    pub(crate) options:   DecodeOptions,
    pub(crate) router:    R,
}

impl<R: Router> Planner<'_, R> {
    /// Run every stage once and return the outcome.
    pub fn run<O: PlanObserver + ?Sized>(self, observer: &mut O) -> PlannerResult<PlanOutcome> {
        let Planner { text, mut settings, overrides, form, now, options, router } = self;

        // ── ① Decode ──────────────────────────────────────────────────────
        let decoded = decode_with(text, &mut settings, &options);
        for diagnostic in &decoded.diagnostics {
            observer.on_diagnostic(diagnostic);
        }
        let mut model = decoded.model;

        // ── ② Overrides ───────────────────────────────────────────────────
        for (key, value) in overrides {
            debug!(key = key.as_str(), value = value.as_str(), "setting overridden");
            settings.set(key, value);
        }

        // ── ③ Phantom edges ───────────────────────────────────────────────
        let phantom_edges = model.venues.generate_phantom_reverse_edges();
        observer.on_decoded(&model, &settings);

        // ── ④ Form ────────────────────────────────────────────────────────
        let form = form.map(|(pairs, token)| {
            let outcome = apply_form_selections(&mut model, &mut settings, &pairs, token);
            observer.on_form(&outcome);
            outcome
        });

        // ── ⑤ Conflicts ───────────────────────────────────────────────────
        let snapshot = settings.snapshot();
        let statistics = compute_conflicts(&mut model, &snapshot, &router);
        observer.on_statistics(&statistics, &model);

        // ── ⑥ Touch ───────────────────────────────────────────────────────
        if let Some(now) = now {
            // The token must change even if the clock did not move.
            let touched = now.0.max(snapshot.last_update.saturating_add(1));
            settings.set(keys::LAST_UPDATE, touched.to_string());
        }

        // ── ⑦ Encode ──────────────────────────────────────────────────────
        let text = encode(&model, &settings)?;

        info!(
            events = model.event_count(),
            diagnostics = decoded.diagnostics.len(),
            conflicts = statistics.conflicts,
            "request planned"
        );
        Ok(PlanOutcome {
            model,
            settings,
            statistics,
            diagnostics: decoded.diagnostics,
            form,
            phantom_edges,
            text,
        })
    }
}
