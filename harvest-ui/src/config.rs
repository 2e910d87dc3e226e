//! Application configuration.
//!
//! Loaded from an optional TOML file. Every field has a default, so an empty
//! or missing file yields a working configuration.
//!
//! ```toml
//! [budget]
//! min = 10000
//! max = 200000
//! step = 1000
//! initial = 50000
//! recommended_steps = [10000, 25000, 50000, 75000, 100000, 150000, 200000]
//!
//! [location]
//! default_latitude = 28.6139
//! default_longitude = 77.2090
//! default_label = "New Delhi, India"
//! geolocation_timeout_secs = 10
//!
//! [logging]
//! level = "info"
//! file = "harvest.log"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use harvest_core::{
    Amount, BudgetBounds, BudgetError, DEFAULT_BUDGET_STEP, DEFAULT_INITIAL_BUDGET,
    DEFAULT_LOCATION, DEFAULT_LOCATION_LABEL, DEFAULT_MAX_BUDGET, DEFAULT_MIN_BUDGET, LatLng,
    Place, RecommendedSteps,
};
use serde::Deserialize;

use crate::widgets::BudgetInput;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub budget: BudgetConfig,
    pub location: LocationConfig,
    pub logging: LoggingConfig,
}

/// Budget slider configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub min: Amount,
    pub max: Amount,
    pub step: Amount,
    pub initial: Amount,
    pub recommended_steps: RecommendedSteps,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_BUDGET,
            max: DEFAULT_MAX_BUDGET,
            step: DEFAULT_BUDGET_STEP,
            initial: DEFAULT_INITIAL_BUDGET,
            recommended_steps: RecommendedSteps::default(),
        }
    }
}

impl BudgetConfig {
    pub fn bounds(&self) -> Result<BudgetBounds, BudgetError> {
        BudgetBounds::new(self.min, self.max, self.step)
    }

    /// Builds the budget widget described by this configuration.
    ///
    /// Every recommended step must lie within `min..=max`.
    pub fn build_input(&self) -> Result<BudgetInput, BudgetError> {
        let bounds = self.bounds()?;
        self.recommended_steps.ensure_within(&bounds)?;
        Ok(BudgetInput::new(
            bounds,
            self.recommended_steps.clone(),
            self.initial,
        ))
    }
}

/// Location fallback and geolocation configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub default_latitude: f64,
    pub default_longitude: f64,
    pub default_label: String,
    pub geolocation_timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_latitude: DEFAULT_LOCATION.latitude,
            default_longitude: DEFAULT_LOCATION.longitude,
            default_label: DEFAULT_LOCATION_LABEL.to_string(),
            geolocation_timeout_secs: 10,
        }
    }
}

impl LocationConfig {
    pub fn fallback_place(&self) -> Place {
        Place::new(
            self.default_label.clone(),
            LatLng::new(self.default_latitude, self.default_longitude),
        )
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Log file, appended to. No file logging when absent.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Loads configuration from `path`, or the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid configuration.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }
}
