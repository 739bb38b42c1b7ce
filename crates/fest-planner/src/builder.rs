//! Fluent builder for constructing a [`Planner`].

use fest_codec::DecodeOptions;
use fest_core::settings::{keys, parse_flag};
use fest_core::{FestError, Settings, Stamp};
use fest_schedule::FormPairs;
use fest_venue::{DijkstraRouter, Router};

use crate::{Planner, PlannerError, PlannerResult};

/// Fluent builder for [`Planner<R>`].
///
/// # Required inputs
///
/// - the state text posted with the request
///
/// # Optional inputs (have defaults)
///
/// | Method                    | Default                          |
/// |---------------------------|----------------------------------|
/// | `.settings(s)`            | empty store (documented defaults)|
/// | `.override_setting(k, v)` | none                             |
/// | `.form(pairs, token)`     | no form merge                    |
/// | `.now(stamp)`             | `LastUpdate` left unchanged      |
/// | `.decode_options(o)`      | `DecodeOptions::default()`       |
/// | `.router(r)`              | [`DijkstraRouter`]               |
///
/// # Example
///
/// ```rust,ignore
/// let planner = PlannerBuilder::new(&text)
///     .override_setting("WalkingSpeedKmh", "5")
///     .form(pairs, token)
///     .now(now)
///     .build()?;
/// let outcome = planner.run(&mut NoopObserver)?;
/// ```
pub struct PlannerBuilder<'t, R: Router = DijkstraRouter> {
    text:      &'t str,
    settings:  Settings,
    overrides: Vec<(String, String)>,
    form:      Option<(FormPairs, i64)>,
    now:       Option<Stamp>,
    options:   DecodeOptions,
    router:    R,
}

impl<'t> PlannerBuilder<'t, DijkstraRouter> {
    /// Create a builder for one request's state text.
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            settings:  Settings::new(),
            overrides: Vec::new(),
            form:      None,
            now:       None,
            options:   DecodeOptions::default(),
            router:    DijkstraRouter,
        }
    }
}

impl<'t, R: Router> PlannerBuilder<'t, R> {
    /// Starting settings store.  `Setting` lines in the text are applied on
    /// top of it.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Force `key` to `value` after decoding, whatever the text says.
    pub fn override_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Posted form controls and the `LastUpdate` token the page was
    /// rendered with.
    pub fn form(mut self, pairs: FormPairs, token: i64) -> Self {
        self.form = Some((pairs, token));
        self
    }

    /// Request time, used to advance `LastUpdate`.
    pub fn now(mut self, now: Stamp) -> Self {
        self.now = Some(now);
        self
    }

    pub fn decode_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap the shortest-path engine.
    pub fn router<R2: Router>(self, router: R2) -> PlannerBuilder<'t, R2> {
        PlannerBuilder {
            text:      self.text,
            settings:  self.settings,
            overrides: self.overrides,
            form:      self.form,
            now:       self.now,
            options:   self.options,
            router,
        }
    }

    /// Validate inputs and return a ready-to-run [`Planner`].
    pub fn build(self) -> PlannerResult<Planner<'t, R>> {
        if self.options.max_input_bytes == 0 {
            return Err(PlannerError::Config("max_input_bytes must be positive".into()));
        }
        if let Some(now) = self.now {
            if now.0 < 0 {
                return Err(PlannerError::Config(format!("request time {} is before the epoch", now.0)));
            }
        }
        for (key, value) in &self.overrides {
            validate_override(key, value)?;
        }

        Ok(Planner {
            text:      self.text,
            settings:  self.settings,
            overrides: self.overrides,
            form:      self.form,
            now:       self.now,
            options:   self.options,
            router:    self.router,
        })
    }
}

/// Overrides come from the command line, so unlike state text they are
/// rejected rather than clamped when malformed.
fn validate_override(key: &str, value: &str) -> PlannerResult<()> {
    if Settings::default_for(key).is_none() {
        return Err(PlannerError::Config(format!("unknown setting {key:?}")));
    }
    match key {
        keys::TAB_ONLY | keys::SHOW_PATHS => {
            parse_flag(key, value)?;
        }
        _ => {
            value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| FestError::InvalidSetting { key: key.to_owned(), value: value.to_owned() })?;
        }
    }
    Ok(())
}
