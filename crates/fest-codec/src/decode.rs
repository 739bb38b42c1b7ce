//! Tolerant decoder.
//!
//! Lines are processed top to bottom.  `Setting` lines take effect at once,
//! so a `TabOnly` or `DefaultShowMinutes` change applies to every later line.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use fest_core::Settings;
use fest_schedule::{Model, ScheduleError};

use crate::record::{Record, classify, split_fields};
use crate::{Diagnostic, LineError};

/// Limits applied before decoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Input beyond this is dropped at the last complete line.
    pub max_input_bytes: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { max_input_bytes: 1 << 20 }
    }
}

/// The result of decoding: always a model, plus whatever was skipped.
#[derive(Debug, Default)]
pub struct Decoded {
    pub model:       Model,
    pub diagnostics: Vec<Diagnostic>,
}

/// Decode `text` with default [`DecodeOptions`].
pub fn decode(text: &str, settings: &mut Settings) -> Decoded {
    decode_with(text, settings, &DecodeOptions::default())
}

/// Decode `text` into a fresh model, updating `settings` from its `Setting`
/// lines.
pub fn decode_with(text: &str, settings: &mut Settings, options: &DecodeOptions) -> Decoded {
    let (body, truncated) = bounded(text, options.max_input_bytes);

    let mut decoder = Decoder { settings, model: Model::new(), running: None, diagnostics: Vec::new() };
    let mut lines = 0;
    for (i, line) in body.lines().enumerate() {
        lines = i + 1;
        decoder.line(i + 1, line);
    }
    if truncated {
        decoder.reject(lines + 1, LineError::Truncated { limit: options.max_input_bytes });
    }

    let Decoder { model, diagnostics, .. } = decoder;
    info!(
        lines,
        shows = model.show_count(),
        venues = model.venues.len(),
        events = model.event_count(),
        diagnostics = diagnostics.len(),
        "state decoded"
    );
    Decoded { model, diagnostics }
}

/// The prefix of `text` to decode, and whether anything was cut.
fn bounded(text: &str, limit: usize) -> (&str, bool) {
    if text.len() <= limit {
        return (text, false);
    }
    let cut = text.as_bytes()[..limit]
        .iter()
        .rposition(|&b| b == b'\n')
        .unwrap_or(0);
    (&text[..cut], true)
}

struct Decoder<'s> {
    settings:    &'s mut Settings,
    model:       Model,
    running:     Option<NaiveDate>,
    diagnostics: Vec<Diagnostic>,
}

impl Decoder<'_> {
    fn line(&mut self, number: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let fields = split_fields(line, self.settings.tab_only());
        let outcome = classify(&fields, self.running).and_then(|record| {
            debug!(line = number, ?record, "record");
            self.apply(record)
        });
        if let Err(reason) = outcome {
            self.reject(number, reason);
        }
    }

    fn reject(&mut self, line: usize, reason: LineError) {
        warn!(line, %reason, "line skipped");
        self.diagnostics.push(Diagnostic { line, reason });
    }

    fn apply(&mut self, record: Record<'_>) -> Result<(), LineError> {
        let model = &mut self.model;
        match record {
            Record::Date(date) => self.running = Some(date),
            Record::Event { when, show, venue, selected } => {
                if when.date.is_some() {
                    self.running = when.date;
                }
                let at = when.stamp(self.running)?;
                let venue_id = model.venues.intern(venue);
                if model.event_at(at, venue_id).is_some() {
                    // No show is created for a rejected duplicate.
                    let duplicate = ScheduleError::DuplicateEvent { at, venue: venue.to_owned() };
                    return Err(duplicate.into());
                }
                let show_id = model.intern_show(show, self.settings.default_show_secs());
                let id = model.add_event(at, show_id, venue_id)?;
                if let Some(event) = model.event_mut(id) {
                    event.selected = selected;
                }
            }
            Record::Setting { name, value } => self.settings.set(name, value),
            Record::Favourite { show } => model.show_named_mut(show)?.favourite = true,
            Record::ShowUrl { show, url } => model.show_named_mut(show)?.url = Some(url.to_owned()),
            Record::ShowDuration { show, secs } => model.show_named_mut(show)?.duration_secs = secs,
            Record::VenueUrl { venue, url } => {
                let id = model.venues.intern(venue);
                if let Some(v) = model.venues.venue_mut(id) {
                    v.url = Some(url.to_owned());
                }
            }
            Record::TravelTime { from, to, edge } => {
                let from = model.venues.intern(from);
                let to = model.venues.intern(to);
                model.venues.add_edge(from, to, edge);
            }
            Record::Selected { venue, when } => {
                let at = when.stamp(self.running)?;
                let id = model.event_named(at, venue)?;
                if let Some(event) = model.event_mut(id) {
                    event.selected = true;
                }
            }
        }
        Ok(())
    }
}
