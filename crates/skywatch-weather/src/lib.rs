//! Weather domain logic for the Skywatch dashboard.
//!
//! Composes the NWS client into render-ready data: current conditions
//! with a station/forecast fallback chain, hourly and extended
//! forecasts, a deduplicated severity-sorted alert feed, and a
//! self-adjusting refresh loop.

pub mod alerts;
pub mod config;
pub mod format;
pub mod observation;
pub mod provider;
pub mod refresh;
pub mod units;
pub mod view;

pub use alerts::{aggregate_alerts, ActiveAlert, Severity};
pub use config::DashboardConfig;
pub use observation::{select_best_observation, Observation};
pub use provider::WeatherProvider;
pub use refresh::{RefreshConfig, RefreshHandle};
pub use view::{AlertView, CurrentConditions, LocationCard};
