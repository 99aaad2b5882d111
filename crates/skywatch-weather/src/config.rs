//! Dashboard configuration.
//!
//! Plain data with defaults; parsed from a TOML string by the host.
//! Nothing here touches the filesystem.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::refresh::{RefreshConfig, DEFAULT_INTERVAL_MS, DEFAULT_MAX_BACKOFF_MS};

/// A tracked location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_MS / 1000
}

fn default_max_backoff_secs() -> u64 {
    DEFAULT_MAX_BACKOFF_MS / 1000
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// The location the full dashboard renders.
    pub primary: Place,

    /// Locations rendered as summary cards.
    #[serde(default)]
    pub secondary: Vec<Place>,

    #[serde(default)]
    pub refresh: RefreshSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            primary: Place {
                name: "Austin, TX".to_string(),
                latitude: 30.2672,
                longitude: -97.7431,
            },
            secondary: Vec::new(),
            refresh: RefreshSettings::default(),
        }
    }
}

/// Configuration problems split into hard errors and warnings.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl DashboardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("Failed to parse dashboard config")
    }

    pub fn refresh_config(&self) -> RefreshConfig {
        RefreshConfig::new(
            self.refresh.interval_secs * 1000,
            self.refresh.max_backoff_secs * 1000,
        )
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for place in std::iter::once(&self.primary).chain(self.secondary.iter()) {
            if place.name.trim().is_empty() {
                result.errors.push("location name must not be empty".to_string());
            }
            if !(-90.0..=90.0).contains(&place.latitude) {
                result
                    .errors
                    .push(format!("{}: latitude must be -90..90", place.name));
            }
            if !(-180.0..=180.0).contains(&place.longitude) {
                result
                    .errors
                    .push(format!("{}: longitude must be -180..180", place.name));
            }
        }

        if self.refresh.interval_secs == 0 {
            result
                .warnings
                .push("refresh disabled (interval is 0)".to_string());
        } else if self.refresh.interval_secs > 86_400 {
            result
                .warnings
                .push("refresh interval is more than 24 hours".to_string());
        }
        if self.refresh.max_backoff_secs < self.refresh.interval_secs {
            result
                .warnings
                .push("max backoff is shorter than the base interval".to_string());
        }

        result
    }
}
