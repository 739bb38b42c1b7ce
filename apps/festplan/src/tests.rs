use fest_codec::decode;
use fest_core::Settings;
use fest_schedule::{Model, compute_conflicts};
use fest_venue::DijkstraRouter;

use crate::report::{export_csv, itinerary_lines, parse_form_pairs};

/// Hamlet runs 90 min, so Lear at Hall2 conflicts.  Hall1 and Hall3 are
/// only connected through Hall2.
const STATE: &str = "\
Setting|WalkingSpeedKmh|3.6
Setting|LineupMinutes|0
2024-06-20
19:00|Hamlet|Hall1|Selected
20:00|Lear|Hall2|Selected
22:30|Macbeth|Hall3|Selected
ShowDuration|Hamlet|90
TravelTime|Hall1|Hall2|60
TravelTime|Hall2|Hall3|60
";

fn evaluated(text: &str) -> Model {
    let mut settings = Settings::new();
    let mut model = decode(text, &mut settings).model;
    model.venues.generate_phantom_reverse_edges();
    compute_conflicts(&mut model, &settings.snapshot(), &DijkstraRouter);
    model
}

#[test]
fn form_pairs_parsed_and_comments_skipped() {
    let pairs = parse_form_pairs("# posted\nShow,Hamlet=On\n\nWalkingSpeedKmh = 5\nbroken line\n");
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs["Show,Hamlet"], "On");
    assert_eq!(pairs["WalkingSpeedKmh"], "5");
}

#[test]
fn form_values_may_contain_equals() {
    let pairs = parse_form_pairs("Event,1718910000,A=B=On\n");
    assert_eq!(pairs["Event,1718910000,A"], "B=On");
}

#[test]
fn itinerary_marks_conflicts_and_paths() {
    let model = evaluated(STATE);
    let lines = itinerary_lines(&model, true);

    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("2024-06-20 19:00  Hamlet @ Hall1"));
    assert!(!lines[0].contains("CONFLICT"));
    // 60 m at 3.6 km/h is one minute.
    assert_eq!(lines[1], "        walk 0:01, -0:31 spare");
    assert!(lines[2].ends_with("Lear @ Hall2  ** CONFLICT **"));
    assert_eq!(lines[3], "        walk 0:01, 1:29 spare");
    assert!(lines[4].contains("Macbeth @ Hall3"));
}

#[test]
fn itinerary_shows_multi_hop_paths_when_enabled() {
    let text = STATE.replace("20:00|Lear|Hall2|Selected", "20:00|Lear|Hall2");
    let model = evaluated(&text);

    let lines = itinerary_lines(&model, true);
    assert_eq!(lines[1], "        walk 0:02, 1:58 spare via Hall1 > Hall2 > Hall3");

    let lines = itinerary_lines(&model, false);
    assert_eq!(lines[1], "        walk 0:02, 1:58 spare");
}

#[test]
fn unrouted_leg_is_flagged() {
    let model = evaluated("2024-06-20\n19:00|A|North|Selected\n21:00|B|South|Selected\n");
    let lines = itinerary_lines(&model, true);
    assert!(lines[1].ends_with("(no known path, default travel time)"));
}

#[test]
fn csv_export_writes_one_row_per_selection() {
    let model = evaluated(STATE);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("itinerary.csv");

    export_csv(&path, &model).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let rows: Vec<&str> = written.lines().collect();
    assert_eq!(rows.len(), 4);
    assert!(rows[0].starts_with("start,show,venue"));
    assert!(rows[2].starts_with("2024-06-20 20:00,Lear,Hall2,60,1,"));
}

#[test]
fn default_log_filter_covers_library_crates() {
    use crate::logging::DEFAULT_FILTER;

    for target in ["festplan", "fest_codec", "fest_venue", "fest_schedule", "fest_planner"] {
        assert!(DEFAULT_FILTER.contains(&format!("{target}=info")), "{target}");
    }
    assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER).is_ok());
}
