//! Unit tests for fest-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EventId, ShowId, VenueId};

    #[test]
    fn index_roundtrip() {
        let id = VenueId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(VenueId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(ShowId::INVALID.0, u32::MAX);
        assert_eq!(EventId::default(), EventId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(ShowId(7).to_string(), "ShowId(7)");
    }
}

#[cfg(test)]
mod time {
    use chrono::NaiveDate;

    use crate::time::duration_text;
    use crate::Stamp;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Stamp {
        Stamp::from_naive(NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap())
    }

    #[test]
    fn naive_roundtrip() {
        let s = at(2024, 6, 20, 19, 0);
        assert_eq!(Stamp::from_naive(s.to_naive().unwrap()), s);
    }

    #[test]
    fn text_forms() {
        let s = at(2024, 6, 20, 19, 5);
        assert_eq!(s.time_text().unwrap(), "19:05");
        assert_eq!(s.date_text().unwrap(), "2024-06-20 Thursday");
        assert_eq!(s.date_time_text().unwrap(), "2024-06-20 19:05");
        assert_eq!((s + 30).time_text().unwrap(), "19:05:30");
    }

    #[test]
    fn arithmetic() {
        let a = at(2024, 6, 20, 19, 0);
        let b = a + 75 * 60;
        assert_eq!(b - a, 4_500);
        assert_eq!(a.since(b), -4_500);
    }

    #[test]
    fn durations() {
        assert_eq!(duration_text(540), "0:09");
        assert_eq!(duration_text(-1_860), "-0:31");
        assert_eq!(duration_text(3 * 3_600 + 59), "3:00");
    }
}

#[cfg(test)]
mod when {
    use chrono::{NaiveDate, NaiveTime};

    use crate::{FestError, When};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn iso_date() {
        let w = When::parse("2024-06-20", None).unwrap();
        assert_eq!(w.date, Some(date(2024, 6, 20)));
        assert_eq!(w.time, None);
    }

    #[test]
    fn iso_date_with_weekday_and_time() {
        let w = When::parse("2024-06-20 Thursday 19:30", None).unwrap();
        assert_eq!(w.date, Some(date(2024, 6, 20)));
        assert_eq!(w.time, Some(time(19, 30)));
    }

    #[test]
    fn month_name_forms() {
        let w = When::parse("Thursday, June 20th, 2024", None).unwrap();
        assert_eq!(w.date, Some(date(2024, 6, 20)));
        let w = When::parse("Jun 21", Some(date(2024, 6, 20))).unwrap();
        assert_eq!(w.date, Some(date(2024, 6, 21)));
    }

    #[test]
    fn month_without_year_needs_running_date() {
        assert!(When::parse("Jun 21", None).is_none());
    }

    #[test]
    fn meridiem_forms() {
        assert_eq!(When::parse("7:30pm", None).unwrap().time, Some(time(19, 30)));
        assert_eq!(When::parse("7:30 p.m.", None).unwrap().time, Some(time(19, 30)));
        assert_eq!(When::parse("12 am", None).unwrap().time, Some(time(0, 0)));
        assert_eq!(When::parse("9AM", None).unwrap().time, Some(time(9, 0)));
        assert_eq!(When::parse("noon", None).unwrap().time, Some(time(12, 0)));
    }

    #[test]
    fn rejects_non_dates() {
        for text in ["Favourite", "Setting", "TravelTime", "Selected", "Sun", "42", "25:00", "13pm", ""] {
            assert!(When::parse(text, None).is_none(), "{text:?} parsed as a date");
        }
    }

    #[test]
    fn time_only_resolves_against_running_date() {
        let w = When::parse("19:00", None).unwrap();
        assert_eq!(w.at(None), Err(FestError::MissingDate));
        let running = date(2024, 6, 20);
        assert_eq!(w.at(Some(running)).unwrap(), running.and_time(time(19, 0)));
    }

    #[test]
    fn date_only_is_midnight() {
        let w = When::parse("2024-06-20", None).unwrap();
        assert_eq!(w.at(None).unwrap(), date(2024, 6, 20).and_time(time(0, 0)));
    }
}

#[cfg(test)]
mod settings {
    use crate::settings::{keys, parse_flag, MAX_WALKING_SPEED_KMH};
    use crate::Settings;

    #[test]
    fn defaults() {
        let mut s = Settings::new();
        let snap = s.snapshot();
        assert_eq!(snap.walking_speed_kmh, 4.0);
        assert_eq!(snap.lineup_secs, 600);
        assert_eq!(snap.default_show_secs, 3_600);
        assert_eq!(snap.default_travel_secs, 900);
        assert_eq!(snap.new_day_gap_secs, 5 * 3_600);
        assert!(!snap.tab_only);
        assert!(snap.show_paths);
        assert!(s.is_empty(), "defaults must not be written back");
    }

    #[test]
    fn walking_speed_is_clamped_and_written_back() {
        let mut s = Settings::new();
        s.set(keys::WALKING_SPEED_KMH, "0");
        assert_eq!(s.snapshot().walking_speed_kmh, 0.1);
        assert_eq!(s.get(keys::WALKING_SPEED_KMH), "0.1");

        s.set(keys::WALKING_SPEED_KMH, "1e12");
        assert_eq!(s.snapshot().walking_speed_kmh, MAX_WALKING_SPEED_KMH);
    }

    #[test]
    fn garbage_reverts_to_default() {
        let mut s = Settings::new();
        s.set(keys::LINEUP_MINUTES, "lots");
        s.set(keys::SHOW_PATHS, "maybe");
        let snap = s.snapshot();
        assert_eq!(snap.lineup_secs, 600);
        assert!(snap.show_paths);
        assert_eq!(s.explicit(keys::LINEUP_MINUTES), Some("10"));
        assert_eq!(s.explicit(keys::SHOW_PATHS), Some("true"));
    }

    #[test]
    fn valid_values_are_left_alone() {
        let mut s = Settings::new();
        s.set(keys::LINEUP_MINUTES, "5");
        assert_eq!(s.snapshot().lineup_secs, 300);
        assert_eq!(s.explicit(keys::LINEUP_MINUTES), Some("5"));
    }

    #[test]
    fn unknown_keys_are_kept() {
        let mut s = Settings::new();
        s.set("Theme", "dark");
        s.snapshot();
        assert_eq!(s.get("Theme"), "dark");
        assert_eq!(s.get("Missing"), "");
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("k", "On"), Ok(true));
        assert_eq!(parse_flag("k", "no"), Ok(false));
        assert!(parse_flag("k", "perhaps").is_err());

        let mut s = Settings::new();
        assert!(!s.tab_only());
        s.set(keys::TAB_ONLY, "true");
        assert!(s.tab_only());
    }
}
