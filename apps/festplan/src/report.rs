//! Console output and file helpers for the `plan` command.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use fest_codec::{Diagnostic, write_itinerary};
use fest_core::time::duration_text;
use fest_planner::PlanObserver;
use fest_schedule::{ApplyOutcome, FormPairs, Model};

// ── Form pairs ────────────────────────────────────────────────────────────────

/// Parse `name=value` lines.  Blank lines and `#` comments are skipped.
pub fn parse_form_pairs(text: &str) -> FormPairs {
    let mut pairs = FormPairs::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.split_once('=') {
            Some((name, value)) => {
                pairs.insert(name.trim().to_owned(), value.trim().to_owned());
            }
            None => warn!(line = i + 1, "form line without '=' ignored"),
        }
    }
    pairs
}

pub fn read_form_pairs(path: &Path) -> Result<FormPairs> {
    let text = fs::read_to_string(path).with_context(|| format!("reading form {}", path.display()))?;
    Ok(parse_form_pairs(&text))
}

// ── Itinerary ─────────────────────────────────────────────────────────────────

/// One line per selected event, each followed by the walk to the next.
pub fn itinerary_lines(model: &Model, show_paths: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for id in model.selected_chronological() {
        let Some(event) = model.event(id) else { continue };
        let marker = if event.conflicting { "  ** CONFLICT **" } else { "" };
        lines.push(format!(
            "{}  {} @ {}{marker}",
            event.at,
            model.show_name(event.show),
            model.venues.name(event.venue),
        ));

        let Some(leg) = &event.next else { continue };
        let mut walk = format!(
            "        walk {}, {} spare",
            duration_text(leg.travel_secs),
            duration_text(leg.spare_secs),
        );
        if !leg.routed {
            walk.push_str(" (no known path, default travel time)");
        } else if show_paths && leg.path.len() > 2 {
            let via: Vec<&str> = leg.path.iter().map(|&v| model.venues.name(v)).collect();
            walk.push_str(&format!(" via {}", via.join(" > ")));
        }
        lines.push(walk);
    }
    lines
}

pub fn export_csv(path: &Path, model: &Model) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_itinerary(model, BufWriter::new(file))?;
    Ok(())
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints skipped lines and form outcomes as the planner runs.
#[derive(Default)]
pub struct ConsoleObserver {
    pub skipped: usize,
}

impl PlanObserver for ConsoleObserver {
    fn on_diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.skipped += 1;
        println!("  skipped {diagnostic}");
    }

    fn on_form(&mut self, outcome: &ApplyOutcome) {
        match outcome {
            ApplyOutcome::Applied(s) => println!(
                "Form applied: {} selected, {} favourites, {} ignored",
                s.selected, s.favourites, s.ignored
            ),
            ApplyOutcome::Stale { expected, got } => {
                println!("Form ignored: rendered for update {got}, state is at {expected}")
            }
        }
    }
}
