//! Merging form controls back into the model.
//!
//! # Control names
//!
//! | Control                         | Value | Meaning                         |
//! |---------------------------------|-------|---------------------------------|
//! | `Event,<epochSeconds>,<venue>`  | `On`  | event is selected               |
//! | `Show,<showName>`               | `On`  | show is a favourite             |
//! | `WalkingSpeedKmh` etc.          | text  | setting edited on the page      |
//! | `ShowPaths`                     | `On`  | flag setting (checkbox)         |
//!
//! Unchecked checkboxes are simply absent from a submission, so when a form
//! is applied it is authoritative: every event and show not named `On` is
//! cleared.
//!
//! # Freshness
//!
//! A page is rendered with the model's `LastUpdate` token.  If the user
//! pastes different state text before submitting, the posted controls
//! describe the old data; the tokens then differ and the form is skipped.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use fest_core::settings::keys;
use fest_core::{Settings, Stamp, VenueId};

use crate::model::Model;

/// Name/value pairs posted by the page.
pub type FormPairs = BTreeMap<String, String>;

const EVENT_PREFIX: &str = "Event";
const SHOW_PREFIX:  &str = "Show";

/// Settings exposed on the page as free text.
const TEXT_SETTINGS: [&str; 3] = [
    keys::WALKING_SPEED_KMH,
    keys::LINEUP_MINUTES,
    keys::DEFAULT_TRAVEL_MINUTES,
];

/// Settings exposed on the page as checkboxes.
const FLAG_SETTINGS: [&str; 1] = [keys::SHOW_PATHS];

/// Control name for the event at `venue` at `at`.
pub fn event_key(at: Stamp, venue: &str) -> String {
    format!("{EVENT_PREFIX},{},{venue}", at.0)
}

/// Control name for the favourite checkbox of `show`.
pub fn show_key(show: &str) -> String {
    format!("{SHOW_PREFIX},{show}")
}

/// A parsed control name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormKey<'a> {
    Event { at: Stamp, venue: &'a str },
    Show(&'a str),
    Setting(&'a str),
}

impl<'a> FormKey<'a> {
    /// Parse a control name.  Returns `None` for names the core does not own.
    pub fn parse(key: &'a str) -> Option<FormKey<'a>> {
        if let Some(rest) = key.strip_prefix(EVENT_PREFIX).and_then(|r| r.strip_prefix(',')) {
            let (secs, venue) = rest.split_once(',')?;
            return Some(FormKey::Event { at: Stamp(secs.parse().ok()?), venue });
        }
        if let Some(show) = key.strip_prefix(SHOW_PREFIX).and_then(|r| r.strip_prefix(',')) {
            return Some(FormKey::Show(show));
        }
        TEXT_SETTINGS
            .iter()
            .chain(FLAG_SETTINGS.iter())
            .find(|name| **name == key)
            .map(|name| FormKey::Setting(name))
    }
}

/// What a successful merge changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FormSummary {
    pub selected:   usize,
    pub favourites: usize,
    pub settings:   usize,
    /// Controls naming events or shows that are not in the model.
    pub ignored:    usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied(FormSummary),
    /// The form was rendered from different state; nothing was changed.
    Stale { expected: i64, got: i64 },
}

fn is_on(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("on")
}

/// Merge posted controls into `model` and `settings` if `token` matches the
/// model's `LastUpdate` setting.
pub fn apply_form_selections(
    model: &mut Model,
    settings: &mut Settings,
    pairs: &FormPairs,
    token: i64,
) -> ApplyOutcome {
    let expected = settings.snapshot().last_update;
    if token != expected {
        info!(expected, got = token, "stale form ignored");
        return ApplyOutcome::Stale { expected, got: token };
    }

    let mut summary = FormSummary::default();
    let mut chosen: FxHashSet<(Stamp, VenueId)> = FxHashSet::default();
    let mut favourites: FxHashSet<&str> = FxHashSet::default();

    for (key, value) in pairs {
        match FormKey::parse(key) {
            Some(FormKey::Event { at, venue }) if is_on(value) => {
                match model.venues.find(venue).filter(|&v| model.event_at(at, v).is_some()) {
                    Some(v) => {
                        chosen.insert((at, v));
                    }
                    None => summary.ignored += 1,
                }
            }
            Some(FormKey::Show(name)) if is_on(value) => {
                if model.find_show(name).is_some() {
                    favourites.insert(name);
                } else {
                    summary.ignored += 1;
                }
            }
            Some(FormKey::Setting(name)) if TEXT_SETTINGS.contains(&name) => {
                settings.set(name, value.trim());
                summary.settings += 1;
            }
            Some(_) | None => {}
        }
    }

    for name in FLAG_SETTINGS {
        let on = pairs.get(name).is_some_and(|v| is_on(v));
        settings.set(name, on.to_string());
        summary.settings += 1;
    }

    for event in model.events_mut() {
        event.selected = chosen.contains(&(event.at, event.venue));
        summary.selected += event.selected as usize;
    }
    for show in model.shows_mut() {
        show.favourite = favourites.contains(show.name.as_str());
        summary.favourites += show.favourite as usize;
    }

    debug!(?summary, "form applied");
    ApplyOutcome::Applied(summary)
}
