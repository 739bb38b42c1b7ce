//! Free-form date/time expressions.
//!
//! State text names dates and times loosely: `2024-06-20`, `Thursday June 20`,
//! `Jun 20, 2024 7:30pm`, `19:00`, `noon`.  A [`When`] is the parsed form of
//! one such expression; either half may be missing.  Lines that carry only a
//! time are resolved against the *running date*, the last date seen earlier
//! in the text.
//!
//! Tokens are split on whitespace and commas and may appear in any order.
//!
//! | Token                     | Meaning                                  |
//! |---------------------------|------------------------------------------|
//! | `YYYY-MM-DD`, `YYYY/MM/DD`| full date                                |
//! | month name or 3+ prefix   | month (needs a day number)               |
//! | weekday name or 3+ prefix | ignored                                  |
//! | `1`..`31`, `20th`         | day of month                             |
//! | `YYYY`                    | year (defaults to the running date's)    |
//! | `H:MM`, `H:MM:SS`         | time, optional attached `am`/`pm`        |
//! | `7pm`, `7 pm`             | hour with meridiem                       |
//! | `am`, `pm`, `a.m.`, `p.m.`| meridiem for the time                    |
//! | `noon`, `midnight`        | 12:00, 00:00                             |
//!
//! Any other token means the text is not a date at all (it is then treated
//! as a keyword by the codec).

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{FestError, FestResult, Stamp};

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Meridiem {
    Am,
    Pm,
}

/// A parsed date/time expression.  At least one half is always present.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct When {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

impl When {
    /// Parse `text`, using `running` to supply the year for month-and-day
    /// dates.  Returns `None` if the text is not a date/time expression.
    pub fn parse(text: &str, running: Option<NaiveDate>) -> Option<When> {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.is_empty() {
            return None;
        }

        let mut scan = Scan::default();
        for (i, tok) in tokens.iter().enumerate() {
            let next_is_meridiem = tokens
                .get(i + 1)
                .is_some_and(|t| meridiem_of(t).is_some());
            scan.token(tok, next_is_meridiem)?;
        }
        scan.finish(running)
    }

    /// `true` if the expression names a calendar date (not just a time).
    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    /// Resolve to an absolute date-time.  A missing date is taken from
    /// `running`; a missing time means midnight.
    pub fn at(&self, running: Option<NaiveDate>) -> FestResult<NaiveDateTime> {
        let date = self.date.or(running).ok_or(FestError::MissingDate)?;
        Ok(date.and_time(self.time.unwrap_or(NaiveTime::MIN)))
    }

    /// Resolve to a [`Stamp`].
    pub fn stamp(&self, running: Option<NaiveDate>) -> FestResult<Stamp> {
        self.at(running).map(Stamp::from_naive)
    }
}

// ── Token scanner ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Scan {
    iso:       Option<NaiveDate>,
    month:     Option<u32>,
    day:       Option<u32>,
    year:      Option<i32>,
    clock:     Option<(u32, u32, u32)>,
    bare_hour: Option<u32>,
    meridiem:  Option<Meridiem>,
}

impl Scan {
    /// Consume one token.  `None` aborts the whole parse.
    fn token(&mut self, tok: &str, next_is_meridiem: bool) -> Option<()> {
        if let Some(m) = meridiem_of(tok) {
            return set_once(&mut self.meridiem, m);
        }
        match tok {
            "noon" => return set_once(&mut self.clock, (12, 0, 0)),
            "midnight" => return set_once(&mut self.clock, (0, 0, 0)),
            _ => {}
        }
        if tok.contains('-') || tok.contains('/') {
            let date = NaiveDate::parse_from_str(tok, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(tok, "%Y/%m/%d"))
                .ok()?;
            return set_once(&mut self.iso, date);
        }
        if tok.contains(':') {
            let (body, m) = split_meridiem_suffix(tok);
            if let Some(m) = m {
                set_once(&mut self.meridiem, m)?;
            }
            return set_once(&mut self.clock, parse_clock(body)?);
        }
        if tok.starts_with(|c: char| c.is_ascii_digit()) {
            return self.number(tok, next_is_meridiem);
        }

        let word = tok.trim_end_matches('.');
        if word.len() >= 3 {
            if let Some(m) = MONTHS.iter().position(|name| name.starts_with(word)) {
                return set_once(&mut self.month, m as u32 + 1);
            }
            if WEEKDAYS.iter().any(|name| name.starts_with(word)) {
                return Some(());
            }
        }
        None
    }

    fn number(&mut self, tok: &str, next_is_meridiem: bool) -> Option<()> {
        let digits_end = tok
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tok.len());
        let (digits, rest) = tok.split_at(digits_end);
        let n: u32 = digits.parse().ok()?;

        if let Some(m) = meridiem_of(rest) {
            set_once(&mut self.meridiem, m)?;
            return set_once(&mut self.bare_hour, n);
        }
        match rest {
            "" if digits.len() == 4 => set_once(&mut self.year, n as i32),
            "" if digits.len() <= 2 && next_is_meridiem => set_once(&mut self.bare_hour, n),
            "" | "st" | "nd" | "rd" | "th" if digits.len() <= 2 => set_once(&mut self.day, n),
            _ => None,
        }
    }

    fn finish(self, running: Option<NaiveDate>) -> Option<When> {
        let date = match (self.iso, self.month) {
            (Some(_), Some(_)) => return None,
            (Some(iso), None) => {
                if self.day.is_some() || self.year.is_some() {
                    return None;
                }
                Some(iso)
            }
            (None, Some(month)) => {
                let year = self.year.or_else(|| running.map(|d| d.year()))?;
                Some(NaiveDate::from_ymd_opt(year, month, self.day?)?)
            }
            (None, None) => {
                if self.day.is_some() || self.year.is_some() {
                    return None;
                }
                None
            }
        };

        let hms = match (self.clock, self.bare_hour) {
            (Some(_), Some(_)) => return None,
            (Some(hms), None) => Some(hms),
            (None, Some(h)) => Some((h, 0, 0)),
            (None, None) => None,
        };
        let time = match (hms, self.meridiem) {
            (None, Some(_)) => return None,
            (None, None) => None,
            (Some((h, m, s)), None) => Some(NaiveTime::from_hms_opt(h, m, s)?),
            (Some((h, m, s)), Some(meridiem)) => {
                if !(1..=12).contains(&h) {
                    return None;
                }
                let h = match meridiem {
                    Meridiem::Am => h % 12,
                    Meridiem::Pm => h % 12 + 12,
                };
                Some(NaiveTime::from_hms_opt(h, m, s)?)
            }
        };

        if date.is_none() && time.is_none() {
            return None;
        }
        Some(When { date, time })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn set_once<T>(slot: &mut Option<T>, value: T) -> Option<()> {
    if slot.is_some() {
        return None;
    }
    *slot = Some(value);
    Some(())
}

fn meridiem_of(tok: &str) -> Option<Meridiem> {
    match tok.replace('.', "").as_str() {
        "am" => Some(Meridiem::Am),
        "pm" => Some(Meridiem::Pm),
        _ => None,
    }
}

fn split_meridiem_suffix(tok: &str) -> (&str, Option<Meridiem>) {
    for (suffix, m) in [
        ("a.m.", Meridiem::Am),
        ("p.m.", Meridiem::Pm),
        ("am", Meridiem::Am),
        ("pm", Meridiem::Pm),
    ] {
        if let Some(body) = tok.strip_suffix(suffix) {
            return (body, Some(m));
        }
    }
    (tok, None)
}

fn parse_clock(body: &str) -> Option<(u32, u32, u32)> {
    let parts: Vec<&str> = body.split(':').collect();
    let field = |s: &str| -> Option<u32> {
        if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    };
    match parts.as_slice() {
        [h, m] => Some((field(h)?, field(m)?, 0)),
        [h, m, s] => Some((field(h)?, field(m)?, field(s)?)),
        _ => None,
    }
}
