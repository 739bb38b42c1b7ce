use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub(crate) const DEFAULT_FILTER: &str =
    "festplan=info,fest_codec=info,fest_venue=info,fest_schedule=info,fest_planner=info";

/// Install the global subscriber.  `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
