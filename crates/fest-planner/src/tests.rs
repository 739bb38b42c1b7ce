//! Unit tests for fest-planner.

use fest_codec::Diagnostic;
use fest_core::{Settings, Stamp};
use fest_schedule::{ApplyOutcome, FormPairs, Model, Statistics, event_key};

use crate::{NoopObserver, PlanObserver, PlannerBuilder, PlannerError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 2024-06-20 00:00.
const DAY: i64 = 1_718_841_600;

fn at(hour: i64, minute: i64) -> Stamp {
    Stamp(DAY + hour * 3_600 + minute * 60)
}

const TWO_HALLS: &str = "\
Setting\tWalkingSpeedKmh\t2
Setting\tLineupMinutes\t5
2024-06-20
19:00\tHamlet\tHall1\tSelected
20:15\tLear\tHall2\tSelected
TravelTime\tHall1\tHall2\t300
";

/// Records the order of callbacks.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl PlanObserver for Recorder {
    fn on_diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.calls.push(format!("diagnostic {}", diagnostic.line));
    }

    fn on_decoded(&mut self, model: &Model, _settings: &Settings) {
        self.calls.push(format!("decoded {}", model.event_count()));
    }

    fn on_form(&mut self, outcome: &ApplyOutcome) {
        let kind = match outcome {
            ApplyOutcome::Applied(_) => "applied",
            ApplyOutcome::Stale { .. } => "stale",
        };
        self.calls.push(format!("form {kind}"));
    }

    fn on_statistics(&mut self, statistics: &Statistics, _model: &Model) {
        self.calls.push(format!("statistics {}", statistics.scheduled_events));
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use fest_codec::DecodeOptions;

    #[test]
    fn builds_with_defaults() {
        assert!(PlannerBuilder::new("").build().is_ok());
    }

    #[test]
    fn unknown_override_rejected() {
        let err = PlannerBuilder::new("").override_setting("Colour", "red").build().err().unwrap();
        assert!(matches!(err, PlannerError::Config(_)));
    }

    #[test]
    fn malformed_override_rejected() {
        let err = PlannerBuilder::new("")
            .override_setting("WalkingSpeedKmh", "brisk")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PlannerError::Setting(_)));

        let err = PlannerBuilder::new("").override_setting("ShowPaths", "maybe").build().err().unwrap();
        assert!(matches!(err, PlannerError::Setting(_)));
    }

    #[test]
    fn negative_request_time_rejected() {
        let err = PlannerBuilder::new("").now(Stamp(-1)).build().err().unwrap();
        assert!(matches!(err, PlannerError::Config(_)));
    }

    #[test]
    fn zero_input_bound_rejected() {
        let err = PlannerBuilder::new("")
            .decode_options(DecodeOptions { max_input_bytes: 0 })
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, PlannerError::Config(_)));
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline {
    use super::*;

    #[test]
    fn callbacks_fire_in_stage_order() {
        let text = format!("{TWO_HALLS}Bogus\n");
        let mut rec = Recorder::default();
        PlannerBuilder::new(&text)
            .form(FormPairs::new(), 0)
            .build()
            .unwrap()
            .run(&mut rec)
            .unwrap();
        assert_eq!(rec.calls, ["diagnostic 7", "decoded 2", "form applied", "statistics 0"]);
    }

    #[test]
    fn no_form_no_form_callback() {
        let mut rec = Recorder::default();
        let outcome = PlannerBuilder::new(TWO_HALLS).build().unwrap().run(&mut rec).unwrap();
        assert!(outcome.form.is_none());
        assert_eq!(rec.calls, ["decoded 2", "statistics 2"]);
    }

    #[test]
    fn legacy_selection_evaluated_without_conflict() {
        let outcome = PlannerBuilder::new(TWO_HALLS).build().unwrap().run(&mut NoopObserver).unwrap();
        assert_eq!(outcome.statistics.scheduled_events, 2);
        assert_eq!(outcome.statistics.conflicts, 0);
        assert_eq!(outcome.phantom_edges, 1);

        let m = &outcome.model;
        let hall1 = m.venues.find("Hall1").unwrap();
        let first = m.event(m.event_at(at(19, 0), hall1).unwrap()).unwrap();
        let leg = first.next.as_ref().unwrap();
        assert_eq!(leg.travel_secs, 540);
        assert_eq!(leg.spare_secs, 60);
        assert!(leg.routed);
    }

    #[test]
    fn phantom_edges_stay_out_of_the_text() {
        let outcome = PlannerBuilder::new(TWO_HALLS).build().unwrap().run(&mut NoopObserver).unwrap();
        assert_eq!(outcome.text.matches("TravelTime").count(), 1);
        // Legacy pre-selection is rewritten as Selected markers.
        assert!(outcome.text.contains("Selected\tHall1\t2024-06-20 19:00\n"));
        assert!(outcome.text.contains("Selected\tHall2\t2024-06-20 20:15\n"));
    }

    #[test]
    fn override_beats_text() {
        let outcome = PlannerBuilder::new(TWO_HALLS)
            .override_setting("WalkingSpeedKmh", "6")
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert_eq!(outcome.settings.get("WalkingSpeedKmh"), "6");
        assert!(outcome.text.contains("Setting\tWalkingSpeedKmh\t6\n"));
    }

    #[test]
    fn fresh_form_is_authoritative() {
        let mut pairs = FormPairs::new();
        pairs.insert(event_key(at(20, 15), "Hall2"), "On".into());
        let outcome = PlannerBuilder::new(TWO_HALLS)
            .form(pairs, 0)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert!(matches!(outcome.form, Some(ApplyOutcome::Applied(s)) if s.selected == 1));
        assert_eq!(outcome.statistics.scheduled_events, 1);
        assert_eq!(outcome.statistics.unseen_shows, 1);
    }

    #[test]
    fn stale_form_changes_nothing() {
        let outcome = PlannerBuilder::new(TWO_HALLS)
            .form(FormPairs::new(), 7)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert_eq!(outcome.form, Some(ApplyOutcome::Stale { expected: 0, got: 7 }));
        assert_eq!(outcome.statistics.scheduled_events, 2);
    }

    #[test]
    fn last_update_always_advances() {
        let text = "Setting\tLastUpdate\t100\n";
        let run = |now: Option<Stamp>| {
            let mut builder = PlannerBuilder::new(text);
            if let Some(now) = now {
                builder = builder.now(now);
            }
            builder.build().unwrap().run(&mut NoopObserver).unwrap().settings
        };

        assert_eq!(run(Some(Stamp(500))).get("LastUpdate"), "500");
        assert_eq!(run(Some(Stamp(50))).get("LastUpdate"), "101");
        assert_eq!(run(None).get("LastUpdate"), "100");
    }
}

// ── Router swapping ───────────────────────────────────────────────────────────

#[cfg(test)]
mod router_tests {
    use super::*;
    use fest_core::VenueId;
    use fest_venue::{Route, Router, VenueError, VenueGraph, VenueResult};

    /// A router that never finds a path.
    struct Nowhere;

    impl Router for Nowhere {
        fn route(&self, _: &VenueGraph, from: VenueId, to: VenueId, _: f64) -> VenueResult<Route> {
            Err(VenueError::NoRoute { from, to })
        }
    }

    #[test]
    fn unroutable_pairs_use_default_travel() {
        let outcome = PlannerBuilder::new(TWO_HALLS)
            .router(Nowhere)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();

        // 19:00 + 60 + 15 default travel + 5 lineup = 20:20 > 20:15.
        assert_eq!(outcome.statistics.conflicts, 1);
        let m = &outcome.model;
        let hall1 = m.venues.find("Hall1").unwrap();
        let leg = m.event(m.event_at(at(19, 0), hall1).unwrap()).unwrap().next.clone().unwrap();
        assert!(!leg.routed);
        assert!(leg.path.is_empty());
        assert_eq!(leg.spare_secs, -5 * 60);
    }
}
