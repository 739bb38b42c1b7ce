//! festplan — command-line front end for the festival schedule planner.
//!
//! `plan` runs one request against a state file the way the web page would:
//! decode, merge an optional posted form, evaluate conflicts, and write the
//! state back out.  `route` answers a single shortest-path query.

mod logging;
mod report;

#[cfg(test)]
mod tests;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;

use fest_codec::decode;
use fest_core::settings::keys;
use fest_core::time::duration_text;
use fest_core::{Settings, Stamp};
use fest_planner::PlannerBuilder;
use fest_venue::{DijkstraRouter, Router, VenueError};

use report::ConsoleObserver;

#[derive(Parser)]
#[command(name = "festplan")]
#[command(about = "Festival schedule planner")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a state file and print the selected itinerary
    Plan {
        /// State text file
        state: PathBuf,
        /// Posted form controls, one `name=value` per line
        #[arg(long, requires = "token")]
        form: Option<PathBuf>,
        /// LastUpdate token the form was rendered with
        #[arg(long, requires = "form")]
        token: Option<i64>,
        /// Write the re-encoded state here
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write the itinerary as CSV here
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Walking speed in km/h, overriding the state file
        #[arg(long)]
        speed: Option<f64>,
    },
    /// Print the shortest walking path between two venues
    Route {
        /// State text file
        state: PathBuf,
        from: String,
        to: String,
        /// Walking speed in km/h, overriding the state file
        #[arg(long)]
        speed: Option<f64>,
    },
}

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan { state, form, token, out, csv, speed } => {
            plan(&state, form.as_deref().zip(token), out.as_deref(), csv.as_deref(), speed)
        }
        Commands::Route { state, from, to, speed } => route(&state, &from, &to, speed),
    }
}

fn read_state(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading state {}", path.display()))
}

fn now() -> Stamp {
    Stamp::from_naive(Local::now().naive_local())
}

fn plan(
    state: &Path,
    form: Option<(&Path, i64)>,
    out: Option<&Path>,
    csv: Option<&Path>,
    speed: Option<f64>,
) -> Result<()> {
    let text = read_state(state)?;

    let mut builder = PlannerBuilder::new(&text).now(now());
    if let Some(speed) = speed {
        builder = builder.override_setting(keys::WALKING_SPEED_KMH, speed.to_string());
    }
    if let Some((path, token)) = form {
        builder = builder.form(report::read_form_pairs(path)?, token);
    }

    let mut observer = ConsoleObserver::default();
    let outcome = builder.build()?.run(&mut observer)?;
    if observer.skipped > 0 {
        println!("{} line(s) skipped", observer.skipped);
        println!();
    }

    let mut settings = outcome.settings.clone();
    let show_paths = settings.snapshot().show_paths;
    let lines = report::itinerary_lines(&outcome.model, show_paths);
    if lines.is_empty() {
        println!("Nothing selected.");
    }
    for line in &lines {
        println!("{line}");
    }
    println!();
    println!("{}", outcome.statistics);

    if let Some(path) = out {
        fs::write(path, &outcome.text).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "state written");
    }
    if let Some(path) = csv {
        report::export_csv(path, &outcome.model)?;
        info!(path = %path.display(), "itinerary exported");
    }
    Ok(())
}

fn route(state: &Path, from: &str, to: &str, speed: Option<f64>) -> Result<()> {
    let text = read_state(state)?;
    let mut settings = Settings::new();
    let mut decoded = decode(&text, &mut settings);
    if let Some(speed) = speed {
        settings.set(keys::WALKING_SPEED_KMH, speed.to_string());
    }
    decoded.model.venues.generate_phantom_reverse_edges();
    let graph = &decoded.model.venues;

    let find = |name: &str| graph.find(name).ok_or_else(|| VenueError::UnknownVenue(name.to_owned()));
    let (origin, destination) = (find(from)?, find(to)?);
    let speed_kmh = settings.snapshot().walking_speed_kmh;
    let route = DijkstraRouter.route(graph, origin, destination, speed_kmh)?;

    for pair in route.venues.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let notes = graph.edge(a, b).map_or("", |e| e.notes.as_str());
        println!("{} -> {}  {notes}", graph.name(a), graph.name(b));
    }
    println!(
        "{} venue(s), {} walking at {speed_kmh} km/h",
        route.venues.len(),
        duration_text(route.travel_secs()),
    );
    Ok(())
}
