//! Conflict detection and schedule statistics.
//!
//! Runs once per request after decoding (and after any form edits).  It
//! never fails: a missing path falls back to the configured default travel
//! time and the result is always a complete [`Statistics`].

use tracing::{debug, info};

use fest_core::SettingsSnapshot;
use fest_venue::{Route, Router};

use crate::model::{Leg, Model};
use crate::Statistics;

/// Recompute scheduled counts, legs, conflict flags and statistics.
///
/// 1. Count every selected event against its show and the totals.
/// 2. Walk selected events in order; for each adjacent pair store travel,
///    path and spare time on the earlier event and flag the later one if it
///    starts before the earlier one's availability end.
/// 3. Classify shows as redundant, unseen, and unseen favourites.
pub fn compute_conflicts<R: Router + ?Sized>(
    model: &mut Model,
    settings: &SettingsSnapshot,
    router: &R,
) -> Statistics {
    let mut stats = Statistics::default();

    // ── Reset derived state ───────────────────────────────────────────────
    for show in model.shows_mut() {
        show.scheduled_count = 0;
    }
    for event in model.events_mut() {
        event.conflicting = false;
        event.next = None;
    }

    let selected = model.selected_chronological();

    // ── Pass 1: counts ────────────────────────────────────────────────────
    for &id in &selected {
        let show_id = model.event(id).map(|e| e.show);
        if let Some(show) = show_id.and_then(|s| model.show_mut(s)) {
            show.scheduled_count += 1;
            stats.scheduled_events += 1;
            stats.seconds_watched = stats.seconds_watched.saturating_add(show.duration_secs);
        }
    }

    // ── Pass 2: adjacent pairs ────────────────────────────────────────────
    for pair in selected.windows(2) {
        let (prev_id, cur_id) = (pair[0], pair[1]);
        let (Some(prev), Some(cur)) = (model.event(prev_id), model.event(cur_id)) else {
            continue;
        };
        let (prev_at, prev_venue, cur_at, cur_venue) = (prev.at, prev.venue, cur.at, cur.venue);
        let duration = model.show(prev.show).map_or(0, |s| s.duration_secs);

        let (path, travel_secs, routed) =
            match router.route(&model.venues, prev_venue, cur_venue, settings.walking_speed_kmh) {
                Ok(route) => {
                    let travel = route.travel_secs();
                    let Route { venues, .. } = route;
                    (venues, travel, true)
                }
                Err(e) => {
                    debug!(error = %e, "falling back to default travel time");
                    (Vec::new(), settings.default_travel_secs, false)
                }
            };

        let available_at =
            prev_at + duration.saturating_add(travel_secs).saturating_add(settings.lineup_secs);
        let spare_secs = cur_at - available_at;

        if let Some(prev) = model.event_mut(prev_id) {
            prev.next = Some(Leg { path, travel_secs, spare_secs, routed });
        }
        if cur_at < available_at {
            if let Some(cur) = model.event_mut(cur_id) {
                cur.conflicting = true;
            }
            stats.conflicts += 1;
            debug!(at = %cur_at, short_by = available_at - cur_at, "conflict");
        }
    }

    // ── Pass 3: show coverage ─────────────────────────────────────────────
    for (_, show) in model.shows() {
        if show.scheduled_count > 1 {
            stats.redundant_shows += 1;
        }
        if show.scheduled_count == 0 {
            stats.unseen_shows += 1;
            if show.favourite {
                stats.unseen_favourites += 1;
            }
        }
    }

    info!(%stats, "schedule evaluated");
    stats
}
