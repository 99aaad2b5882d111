//! High-level weather provider for the dashboard.
//!
//! One provider serves every tracked location; endpoint lookups are
//! memoized in the shared cache. Each method is an independent failure
//! boundary so one broken subsystem never blanks the others.

use tracing::{instrument, warn};

use skywatch_nws::types::ForecastPeriod;
use skywatch_nws::{EndpointCache, EndpointResolver, NwsClient, NwsError};

use crate::alerts::{aggregate_alerts, ActiveAlert};
use crate::observation::select_best_observation;
use crate::view::CurrentConditions;

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: NwsClient,
    resolver: EndpointResolver,
}

impl WeatherProvider {
    pub fn new() -> Result<Self, NwsError> {
        Ok(Self::with_client(NwsClient::new()?))
    }

    pub fn with_client(client: NwsClient) -> Self {
        let resolver = EndpointResolver::new(client.clone());
        Self { client, resolver }
    }

    /// Share an existing endpoint cache between providers.
    pub fn with_cache(client: NwsClient, cache: EndpointCache) -> Self {
        let resolver = EndpointResolver::with_cache(client.clone(), cache);
        Self { client, resolver }
    }

    pub fn cache(&self) -> &EndpointCache {
        self.resolver.cache()
    }

    /// Current conditions via the fallback chain: best nearby station
    /// first, first hourly-forecast period when no station yields
    /// usable data.
    #[instrument(skip(self), level = "info")]
    pub async fn current_conditions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, NwsError> {
        let endpoints = self.resolver.resolve(latitude, longitude).await?;

        match self.observed_conditions(&endpoints.stations_url).await {
            Ok(conditions) => Ok(conditions),
            Err(error) => {
                warn!(%error, "live observation unavailable, falling back to the hourly forecast");
                let forecast = self.client.forecast(&endpoints.hourly_forecast_url).await?;
                forecast
                    .properties
                    .periods
                    .into_iter()
                    .next()
                    .map(CurrentConditions::from_forecast_period)
                    .ok_or(NwsError::NoUsableObservation)
            }
        }
    }

    async fn observed_conditions(
        &self,
        stations_url: &str,
    ) -> Result<CurrentConditions, NwsError> {
        let stations = self.client.stations(stations_url).await?;
        let observation = select_best_observation(&self.client, &stations.features).await?;
        Ok(CurrentConditions::from_observation(&observation))
    }

    /// Hourly forecast periods for the chart.
    #[instrument(skip(self), level = "info")]
    pub async fn hourly_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastPeriod>, NwsError> {
        let endpoints = self.resolver.resolve(latitude, longitude).await?;
        let forecast = self.client.forecast(&endpoints.hourly_forecast_url).await?;
        Ok(forecast.properties.periods)
    }

    /// Extended (day/night) forecast periods for the table.
    #[instrument(skip(self), level = "info")]
    pub async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastPeriod>, NwsError> {
        let endpoints = self.resolver.resolve(latitude, longitude).await?;
        let forecast = self.client.forecast(&endpoints.forecast_url).await?;
        Ok(forecast.properties.periods)
    }

    /// Aggregated active-alert feed.
    #[instrument(skip(self), level = "info")]
    pub async fn active_alerts(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ActiveAlert>, NwsError> {
        aggregate_alerts(&self.client, latitude, longitude).await
    }

    /// Alert count for a location card; `None` renders as
    /// "Unavailable".
    #[instrument(skip(self), level = "info")]
    pub async fn alert_count(&self, latitude: f64, longitude: f64) -> Option<usize> {
        match self.active_alerts(latitude, longitude).await {
            Ok(alerts) => Some(alerts.len()),
            Err(error) => {
                warn!(%error, "alert count unavailable");
                None
            }
        }
    }
}
