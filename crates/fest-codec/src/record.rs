//! Splitting a line into fields and classifying it as a [`Record`].
//!
//! Classification is pure: it looks at the fields and the running date and
//! nothing else.  Applying a record to the model happens in
//! [`decode`](crate::decode).

use chrono::NaiveDate;

use fest_core::When;
use fest_core::settings::MAX_MINUTES;
use fest_venue::TravelEdge;

use crate::LineError;

/// Fields past this many are ignored.
pub const MAX_FIELDS: usize = 8;

/// Keywords recognised in field 0.  Matching is case-sensitive.
pub mod keyword {
    pub const SETTING:       &str = "Setting";
    pub const FAVOURITE:     &str = "Favourite";
    pub const SHOW_URL:      &str = "ShowURL";
    pub const SHOW_DURATION: &str = "ShowDuration";
    pub const VENUE_URL:     &str = "VenueURL";
    pub const TRAVEL_TIME:   &str = "TravelTime";
    pub const SELECTED:      &str = "Selected";
}

/// One classified line of state text, borrowing its strings from the line.
#[derive(Clone, Debug, PartialEq)]
pub enum Record<'a> {
    /// A bare date: moves the running date, creates nothing.
    Date(NaiveDate),
    Event {
        when:     When,
        show:     &'a str,
        venue:    &'a str,
        /// Legacy trailing `Selected` field.
        selected: bool,
    },
    Setting { name: &'a str, value: &'a str },
    Favourite { show: &'a str },
    ShowUrl { show: &'a str, url: &'a str },
    ShowDuration { show: &'a str, secs: i64 },
    VenueUrl { venue: &'a str, url: &'a str },
    TravelTime { from: &'a str, to: &'a str, edge: TravelEdge },
    Selected { venue: &'a str, when: When },
}

/// Split `line` on TAB, and on `|` too unless `tab_only`.  Each field is
/// trimmed; at most [`MAX_FIELDS`] are returned.
pub fn split_fields(line: &str, tab_only: bool) -> Vec<&str> {
    line.split(|c: char| c == '\t' || (!tab_only && c == '|'))
        .take(MAX_FIELDS)
        .map(str::trim)
        .collect()
}

/// Classify the fields of one non-blank line.
pub fn classify<'a>(fields: &[&'a str], running: Option<NaiveDate>) -> Result<Record<'a>, LineError> {
    let head = fields.first().copied().unwrap_or_default();

    if let Some(when) = When::parse(head, running) {
        return classify_dated(when, fields);
    }

    match head {
        keyword::SETTING => {
            require(fields, head, 3)?;
            Ok(Record::Setting {
                name:  non_empty(head, "name", fields[1])?,
                value: fields[2],
            })
        }
        keyword::FAVOURITE => {
            require(fields, head, 2)?;
            Ok(Record::Favourite { show: non_empty(head, "show", fields[1])? })
        }
        keyword::SHOW_URL => {
            require(fields, head, 3)?;
            Ok(Record::ShowUrl {
                show: non_empty(head, "show", fields[1])?,
                url:  fields[2],
            })
        }
        keyword::SHOW_DURATION => {
            require(fields, head, 3)?;
            let minutes = number("minutes", fields[2])?;
            if !(0.0..=MAX_MINUTES).contains(&minutes) {
                return Err(LineError::BadNumber { field: "minutes", value: fields[2].to_owned() });
            }
            Ok(Record::ShowDuration {
                show: non_empty(head, "show", fields[1])?,
                secs: (minutes * 60.0).round() as i64,
            })
        }
        keyword::VENUE_URL => {
            require(fields, head, 3)?;
            Ok(Record::VenueUrl {
                venue: non_empty(head, "venue", fields[1])?,
                url:   fields[2],
            })
        }
        keyword::TRAVEL_TIME => {
            require(fields, head, 4)?;
            let distance_m = number("distance", fields[3])?;
            let delay_secs = match fields.get(4).filter(|f| !f.is_empty()) {
                Some(raw) => number("delay", raw)?,
                None => 0.0,
            };
            let notes = fields.get(5).copied().unwrap_or_default();
            Ok(Record::TravelTime {
                from: non_empty(head, "from", fields[1])?,
                to:   non_empty(head, "to", fields[2])?,
                edge: TravelEdge::new(distance_m, delay_secs, notes),
            })
        }
        keyword::SELECTED => {
            require(fields, head, 3)?;
            let when = When::parse(fields[2], running)
                .ok_or_else(|| LineError::BadDate(fields[2].to_owned()))?;
            Ok(Record::Selected { venue: non_empty(head, "venue", fields[1])?, when })
        }
        other => Err(LineError::UnknownKeyword(other.to_owned())),
    }
}

/// A line whose first field is a date and/or time.
fn classify_dated<'a>(when: When, fields: &[&'a str]) -> Result<Record<'a>, LineError> {
    if fields.len() < 3 {
        return match (when.date, when.time) {
            (Some(date), None) => Ok(Record::Date(date)),
            _ => Err(too_few("event", 3, fields.len())),
        };
    }
    Ok(Record::Event {
        when,
        show:     non_empty("event", "show", fields[1])?,
        venue:    non_empty("event", "venue", fields[2])?,
        selected: fields
            .get(3)
            .is_some_and(|f| f.eq_ignore_ascii_case(keyword::SELECTED)),
    })
}

fn require(fields: &[&str], keyword: &str, expected: usize) -> Result<(), LineError> {
    if fields.len() < expected {
        return Err(too_few(keyword, expected, fields.len()));
    }
    Ok(())
}

fn too_few(keyword: &str, expected: usize, found: usize) -> LineError {
    LineError::TooFewFields { keyword: keyword.to_owned(), expected, found }
}

fn non_empty<'a>(keyword: &str, field: &'static str, value: &'a str) -> Result<&'a str, LineError> {
    if value.is_empty() {
        return Err(LineError::EmptyField { keyword: keyword.to_owned(), field });
    }
    Ok(value)
}

fn number(field: &'static str, raw: &str) -> Result<f64, LineError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LineError::BadNumber { field, value: raw.to_owned() })
}
