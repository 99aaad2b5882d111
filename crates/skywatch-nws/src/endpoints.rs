//! Endpoint metadata resolution with a coordinate-keyed cache.
//!
//! Endpoint URLs for a fixed coordinate are immutable for a session,
//! so the cache is unbounded and never expires. A cache-miss race is
//! last-writer-wins; both writers hold equivalent values.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::client::NwsClient;
use crate::error::NwsError;
use crate::types::{EndpointSet, PointInfo};

/// Cache key for a coordinate pair, stable across float formatting.
pub fn coordinate_key(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4},{longitude:.4}")
}

/// Process-wide endpoint cache. Clones share the same backing map, so
/// one cache can serve every location the dashboard tracks.
#[derive(Debug, Clone, Default)]
pub struct EndpointCache {
    inner: Arc<Mutex<HashMap<String, EndpointSet>>>,
}

impl EndpointCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<EndpointSet> {
        self.inner.lock().get(key).cloned()
    }

    pub fn insert(&self, key: String, endpoints: EndpointSet) {
        self.inner.lock().insert(key, endpoints);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// Resolves the downstream endpoint URLs for a coordinate, memoized in
/// an [`EndpointCache`].
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    client: NwsClient,
    cache: EndpointCache,
}

impl EndpointResolver {
    pub fn new(client: NwsClient) -> Self {
        Self::with_cache(client, EndpointCache::new())
    }

    /// Use an existing cache, shared with other resolvers or seeded by
    /// a test.
    pub fn with_cache(client: NwsClient, cache: EndpointCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &EndpointCache {
        &self.cache
    }

    /// Resolve the endpoint set for a coordinate. A cache hit performs
    /// no network call.
    pub async fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<EndpointSet, NwsError> {
        let key = coordinate_key(latitude, longitude);
        if let Some(hit) = self.cache.get(&key) {
            debug!(%key, "endpoint cache hit");
            return Ok(hit);
        }

        let point = self.client.points(latitude, longitude).await?;
        let endpoints = endpoints_from_point(point)?;
        self.cache.insert(key, endpoints.clone());
        Ok(endpoints)
    }
}

fn endpoints_from_point(point: PointInfo) -> Result<EndpointSet, NwsError> {
    let forecast_url = point
        .forecast
        .ok_or_else(|| NwsError::EndpointResolutionFailed("forecast".to_string()))?;
    let hourly_forecast_url = point
        .forecast_hourly
        .ok_or_else(|| NwsError::EndpointResolutionFailed("forecastHourly".to_string()))?;
    let stations_url = point
        .observation_stations
        .ok_or_else(|| NwsError::EndpointResolutionFailed("observationStations".to_string()))?;

    Ok(EndpointSet {
        forecast_url,
        hourly_forecast_url,
        stations_url,
    })
}
