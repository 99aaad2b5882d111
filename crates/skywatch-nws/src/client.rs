//! HTTP client for api.weather.gov.

use std::time::Duration;

use tracing::instrument;

use crate::error::NwsError;
use crate::types::{
    AlertsResponse, ForecastResponse, ObservationResponse, PointInfo, PointsResponse,
    StationsResponse,
};

const NWS_API_BASE: &str = "https://api.weather.gov";
const USER_AGENT: &str = "skywatch/0.1 (https://github.com/skywatch/skywatch)";
const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Longest response-body snippet carried inside a `RequestFailed` error.
const BODY_SNIPPET_LEN: usize = 160;

/// Thin typed client over the NWS JSON endpoints. Cheap to clone; all
/// clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl NwsClient {
    pub fn new() -> Result<Self, NwsError> {
        Self::with_base_url(NWS_API_BASE)
    }

    /// Point the client at a different API root. Used by tests to talk
    /// to a mock server.
    pub fn with_base_url(base_url: &str) -> Result<Self, NwsError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(REQUEST_TIMEOUT_MS),
        })
    }

    /// Override the per-request wall-clock timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Point metadata: endpoint URLs and zone references.
    #[instrument(skip(self), level = "info")]
    pub async fn points(&self, latitude: f64, longitude: f64) -> Result<PointInfo, NwsError> {
        let url = format!("{}/points/{},{}", self.base_url, latitude, longitude);
        let response: PointsResponse = self.get_json(&url).await?;
        Ok(response.properties)
    }

    /// Active alerts covering a coordinate.
    #[instrument(skip(self), level = "info")]
    pub async fn alerts_for_point(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<AlertsResponse, NwsError> {
        let url = format!(
            "{}/alerts?status=actual&message_type=alert&active=1&point={},{}",
            self.base_url, latitude, longitude
        );
        self.get_json(&url).await
    }

    /// Active alerts issued for a forecast/county/fire zone.
    #[instrument(skip(self), level = "info")]
    pub async fn alerts_for_zone(&self, zone_code: &str) -> Result<AlertsResponse, NwsError> {
        let url = format!(
            "{}/alerts?status=actual&message_type=alert&active=1&zone={}",
            self.base_url, zone_code
        );
        self.get_json(&url).await
    }

    /// Observation-station list. The URL is opaque, handed out by
    /// `points`.
    #[instrument(skip(self), level = "info")]
    pub async fn stations(&self, stations_url: &str) -> Result<StationsResponse, NwsError> {
        self.get_json(stations_url).await
    }

    /// Latest observation from a single station.
    #[instrument(skip(self), level = "debug")]
    pub async fn latest_observation(
        &self,
        station_id: &str,
    ) -> Result<ObservationResponse, NwsError> {
        let url = format!(
            "{}/stations/{}/observations/latest",
            self.base_url, station_id
        );
        self.get_json(&url).await
    }

    /// Forecast periods from an opaque forecast or hourly-forecast URL
    /// handed out by `points`.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast(&self, forecast_url: &str) -> Result<ForecastResponse, NwsError> {
        self.get_json(forecast_url).await
    }

    /// One time-bounded, credential-free, cache-bypassing GET. No
    /// retries here; callers decide how to degrade.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, NwsError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/geo+json")
            .header("Cache-Control", "no-cache")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NwsError::Timeout
                } else {
                    NwsError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(BODY_SNIPPET_LEN).collect();
            return Err(NwsError::RequestFailed {
                status: status.as_u16(),
                body: snippet,
            });
        }

        response
            .json()
            .await
            .map_err(|e| NwsError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_points_extracts_properties() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/30.2672,-97.7431"))
            .and(header("Accept", "application/geo+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": {
                    "forecast": "https://api.weather.gov/gridpoints/EWX/155,90/forecast",
                    "forecastHourly": "https://api.weather.gov/gridpoints/EWX/155,90/forecast/hourly",
                    "observationStations": "https://api.weather.gov/gridpoints/EWX/155,90/stations",
                    "forecastZone": "https://api.weather.gov/zones/forecast/TXZ192",
                    "county": "https://api.weather.gov/zones/county/TXC453"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
        let point = client.points(30.2672, -97.7431).await.unwrap();

        assert!(point.forecast.unwrap().ends_with("/forecast"));
        assert!(point.fire_weather_zone.is_none());
    }

    #[tokio::test]
    async fn test_alert_query_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/alerts"))
            .and(query_param("status", "actual"))
            .and(query_param("message_type", "alert"))
            .and(query_param("active", "1"))
            .and(query_param("zone", "TXZ192"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "features": [] })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
        let alerts = client.alerts_for_zone("TXZ192").await.unwrap();
        assert!(alerts.features.is_empty());
    }

    #[tokio::test]
    async fn test_request_failed_carries_truncated_body() {
        let mock_server = MockServer::start().await;

        let long_body = "x".repeat(500);
        Mock::given(method("GET"))
            .and(path("/stations/KAUS/observations/latest"))
            .respond_with(ResponseTemplate::new(500).set_body_string(long_body))
            .mount(&mock_server)
            .await;

        let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
        let result = client.latest_observation("KAUS").await;

        match result {
            Err(NwsError::RequestFailed { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), 160);
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout_cancels_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/30,-97"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "properties": {} }))
                    .set_delay(Duration::from_millis(250)),
            )
            .mount(&mock_server)
            .await;

        let client = NwsClient::with_base_url(&mock_server.uri())
            .unwrap()
            .request_timeout(Duration::from_millis(25));
        let result = client.points(30.0, -97.0).await;

        assert!(matches!(result, Err(NwsError::Timeout)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/30,-97"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
        let result = client.points(30.0, -97.0).await;

        assert!(matches!(result, Err(NwsError::Parse(_))));
    }
}
