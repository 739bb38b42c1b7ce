//! Canonical encoder.
//!
//! Output order:
//!
//! 1. `Setting` lines, `TabOnly` first so it governs the rest of the text
//! 2. events, grouped into days
//! 3. `ShowDuration` for shows whose duration differs from the default
//! 4. `ShowURL`, `VenueURL`
//! 5. authored `TravelTime` edges (phantoms are regenerated on decode)
//! 6. `Favourite` and `Selected` markers
//!
//! Names read while `TabOnly` was on may contain `|`.  When any written
//! field does, the text opens with `TabOnly true` and, if the settings say
//! otherwise, closes with a `Setting` line restoring the real value.
//!
//! A day group starts with a blank line and a date line whenever the gap
//! from the previous event exceeds `NewDayGapHours`.  Within a group events
//! on the running date are written with their time only.

use chrono::NaiveDate;
use tracing::debug;

use fest_core::settings::{format_number, keys};
use fest_core::time::SECS_PER_MINUTE;
use fest_core::{Settings, Stamp};
use fest_schedule::Model;

use crate::CodecResult;
use crate::escape::escape_markup;
use crate::record::keyword;

/// Encode `model` and `settings` as TAB-separated state text.
pub fn encode(model: &Model, settings: &Settings) -> CodecResult<String> {
    Encoder::new(false).run(model, settings)
}

/// Like [`encode`] with every field entity-escaped for a textarea.
pub fn encode_for_markup(model: &Model, settings: &Settings) -> CodecResult<String> {
    Encoder::new(true).run(model, settings)
}

struct Encoder {
    markup: bool,
    out:    String,
    /// Some field written so far contains `|`.
    pipes:  bool,
}

impl Encoder {
    fn new(markup: bool) -> Self {
        Self { markup, out: String::new(), pipes: false }
    }

    fn line(&mut self, fields: &[&str]) {
        self.pipes |= fields.iter().any(|f| f.contains('|'));
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push('\t');
            }
            if self.markup {
                self.out.push_str(&escape_markup(field));
            } else {
                self.out.push_str(field);
            }
        }
        self.out.push('\n');
    }

    fn run(mut self, model: &Model, settings: &Settings) -> CodecResult<String> {
        let snapshot = settings.clone().snapshot();

        self.settings(settings);
        self.events(model, snapshot.new_day_gap_secs)?;

        let mut shows: Vec<_> = model.shows().map(|(_, s)| s).collect();
        shows.sort_by(|a, b| a.name.cmp(&b.name));

        if !shows.is_empty() {
            self.out.push('\n');
        }
        for show in shows.iter().filter(|s| s.duration_secs != snapshot.default_show_secs) {
            let minutes = format_number(show.duration_secs as f64 / SECS_PER_MINUTE as f64);
            self.line(&[keyword::SHOW_DURATION, &show.name, &minutes]);
        }
        for show in &shows {
            if let Some(url) = &show.url {
                self.line(&[keyword::SHOW_URL, &show.name, url]);
            }
        }

        let mut venues: Vec<_> = model.venues.iter().collect();
        venues.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));
        for (_, venue) in &venues {
            if let Some(url) = &venue.url {
                self.line(&[keyword::VENUE_URL, &venue.name, url]);
            }
        }

        let mut edges: Vec<_> = model
            .venues
            .authored_edges()
            .map(|(from, to, e)| (model.venues.name(from), model.venues.name(to), e))
            .collect();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        for (from, to, edge) in edges {
            let distance = format_number(edge.distance_m);
            let delay = format_number(edge.delay_secs);
            if edge.notes.is_empty() {
                self.line(&[keyword::TRAVEL_TIME, from, to, &distance, &delay]);
            } else {
                self.line(&[keyword::TRAVEL_TIME, from, to, &distance, &delay, &edge.notes]);
            }
        }

        for show in shows.iter().filter(|s| s.favourite) {
            self.line(&[keyword::FAVOURITE, &show.name]);
        }
        for id in model.selected_chronological() {
            let Some(event) = model.event(id) else { continue };
            let when = event.at.date_time_text()?;
            self.line(&[keyword::SELECTED, model.venues.name(event.venue), &when]);
        }

        let text = self.pin_tab_only(settings);
        debug!(bytes = text.len(), "state encoded");
        Ok(text)
    }

    /// Every setting except `TabOnly`, which [`Encoder::pin_tab_only`] adds.
    fn settings(&mut self, settings: &Settings) {
        for (name, value) in settings.iter().filter(|(name, _)| *name != keys::TAB_ONLY) {
            self.line(&[keyword::SETTING, name, value]);
        }
    }

    /// Put the `TabOnly` line in front of the body.
    fn pin_tab_only(self, settings: &Settings) -> String {
        let body = self.out;
        let mut head = Encoder::new(self.markup);
        if self.pipes && !settings.tab_only() {
            head.line(&[keyword::SETTING, keys::TAB_ONLY, "true"]);
            head.out.push_str(&body);
            head.line(&[keyword::SETTING, keys::TAB_ONLY, settings.get(keys::TAB_ONLY)]);
        } else {
            if let Some(value) = settings.explicit(keys::TAB_ONLY) {
                head.line(&[keyword::SETTING, keys::TAB_ONLY, value]);
            }
            head.out.push_str(&body);
        }
        head.out
    }

    fn events(&mut self, model: &Model, new_day_gap_secs: i64) -> CodecResult<()> {
        let mut running: Option<NaiveDate> = None;
        let mut previous: Option<Stamp> = None;

        for id in model.chronological() {
            let Some(event) = model.event(id) else { continue };
            let date = event.at.date()?;

            if previous.is_none_or(|p| event.at - p > new_day_gap_secs) {
                self.out.push('\n');
                self.line(&[&event.at.date_text()?]);
                running = Some(date);
            }
            previous = Some(event.at);

            let when = if running == Some(date) {
                event.at.time_text()?
            } else {
                running = Some(date);
                event.at.date_time_text()?
            };
            self.line(&[&when, model.show_name(event.show), model.venues.name(event.venue)]);
        }
        Ok(())
    }
}
