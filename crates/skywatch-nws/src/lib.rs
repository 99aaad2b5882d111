//! Client for the National Weather Service JSON API.
//!
//! Wraps the `api.weather.gov` endpoints the dashboard consumes:
//! point metadata, observation stations, latest observations, active
//! alerts, and forecast URLs, plus a process-wide endpoint cache.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

pub use client::NwsClient;
pub use endpoints::{coordinate_key, EndpointCache, EndpointResolver};
pub use error::NwsError;
pub use types::EndpointSet;
