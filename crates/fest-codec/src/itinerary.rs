//! CSV export of the selected itinerary.
//!
//! One row per selected event in chronological order.  The travel columns
//! describe the walk to the *next* selected event and are blank on the last
//! row.

use std::io::Write;

use csv::Writer;

use fest_core::time::SECS_PER_MINUTE;
use fest_schedule::Model;

use crate::CodecResult;

const HEADER: [&str; 9] = [
    "start", "show", "venue", "duration_min", "conflict",
    "travel_min", "spare_min", "routed", "path",
];

/// Write the selected events of `model` to `out`.  Run the conflict engine
/// first or the conflict and travel columns are empty.
pub fn write_itinerary<W: Write>(model: &Model, out: W) -> CodecResult<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(HEADER)?;

    for id in model.selected_chronological() {
        let Some(event) = model.event(id) else { continue };
        let duration = model.show(event.show).map_or(0, |s| s.duration_secs);

        let (travel, spare, routed, path) = match &event.next {
            Some(leg) => (
                (leg.travel_secs / SECS_PER_MINUTE).to_string(),
                (leg.spare_secs / SECS_PER_MINUTE).to_string(),
                (leg.routed as u8).to_string(),
                leg.path
                    .iter()
                    .map(|&v| model.venues.name(v))
                    .collect::<Vec<_>>()
                    .join(" > "),
            ),
            None => Default::default(),
        };

        writer.write_record(&[
            event.at.date_time_text()?,
            model.show_name(event.show).to_owned(),
            model.venues.name(event.venue).to_owned(),
            (duration / SECS_PER_MINUTE).to_string(),
            (event.conflicting as u8).to_string(),
            travel,
            spare,
            routed,
            path,
        ])?;
    }
    writer.flush()?;
    Ok(())
}
