//! Current-conditions fallback chain against a mock NWS server:
//! live observation first, hourly-forecast fallback when no station
//! yields usable data.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use skywatch_nws::{NwsClient, NwsError};
use skywatch_weather::view::ConditionsSource;
use skywatch_weather::WeatherProvider;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LAT: f64 = 30.2672;
const LON: f64 = -97.7431;

async fn mount_points(server: &MockServer) {
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path(format!("/points/{LAT},{LON}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": {
                "forecast": format!("{base}/gridpoints/EWX/155,90/forecast"),
                "forecastHourly": format!("{base}/gridpoints/EWX/155,90/forecast/hourly"),
                "observationStations": format!("{base}/gridpoints/EWX/155,90/stations")
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_stations(server: &MockServer, ids: &[&str]) {
    let features: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({ "properties": { "stationIdentifier": id, "name": id } }))
        .collect();
    Mock::given(method("GET"))
        .and(path("/gridpoints/EWX/155,90/stations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "features": features })),
        )
        .mount(server)
        .await;
}

async fn mount_hourly(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/gridpoints/EWX/155,90/forecast/hourly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": {
                "periods": [{
                    "number": 1,
                    "startTime": "2026-08-01T15:00:00-05:00",
                    "temperature": 98,
                    "temperatureUnit": "F",
                    "windSpeed": "10 mph",
                    "windDirection": "S",
                    "shortForecast": "Sunny",
                    "relativeHumidity": { "value": 31.0 }
                }]
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn live_observation_wins_when_a_station_reports() {
    let mock_server = MockServer::start().await;
    mount_points(&mock_server).await;
    mount_stations(&mock_server, &["KAUS"]).await;

    Mock::given(method("GET"))
        .and(path("/stations/KAUS/observations/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": {
                "timestamp": "2026-08-01T15:53:00+00:00",
                "textDescription": "Partly Cloudy",
                "temperature": { "unitCode": "wmoUnit:degC", "value": 31.1 },
                "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 52.0 },
                "windSpeed": { "unitCode": "wmoUnit:km_h-1", "value": 14.8 },
                "windGust": { "unitCode": "wmoUnit:km_h-1", "value": 25.9 },
                "windDirection": { "unitCode": "wmoUnit:degree_(angle)", "value": 170.0 }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
    let provider = WeatherProvider::with_client(client);

    let conditions = provider.current_conditions(LAT, LON).await.unwrap();

    assert_eq!(conditions.source, ConditionsSource::Observation);
    assert_eq!(conditions.temperature_f, Some(88));
    assert_eq!(conditions.description, "Partly Cloudy");
    assert_eq!(conditions.humidity_percent, Some(52));
    assert_eq!(conditions.wind.as_deref(), Some("9 mph S (gusts 16 mph)"));
    assert!(conditions.as_of.contains("Aug 1"));
}

#[tokio::test]
async fn hourly_forecast_backs_up_a_dead_station_list() {
    let mock_server = MockServer::start().await;
    mount_points(&mock_server).await;
    mount_hourly(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/EWX/155,90/stations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
    let provider = WeatherProvider::with_client(client);

    let conditions = provider.current_conditions(LAT, LON).await.unwrap();

    assert_eq!(conditions.source, ConditionsSource::HourlyForecast);
    assert_eq!(conditions.temperature_f, Some(98));
    assert_eq!(conditions.description, "Sunny");
    assert_eq!(conditions.wind.as_deref(), Some("10 mph S"));
}

#[tokio::test]
async fn hourly_forecast_backs_up_silent_stations() {
    let mock_server = MockServer::start().await;
    mount_points(&mock_server).await;
    mount_stations(&mock_server, &["KAUS", "KATT"]).await;
    mount_hourly(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/stations/KAUS/observations/latest"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stations/KATT/observations/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": null
        })))
        .mount(&mock_server)
        .await;

    let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
    let provider = WeatherProvider::with_client(client);

    let conditions = provider.current_conditions(LAT, LON).await.unwrap();
    assert_eq!(conditions.source, ConditionsSource::HourlyForecast);
}

#[tokio::test]
async fn both_sources_failing_surfaces_an_error() {
    let mock_server = MockServer::start().await;
    mount_points(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/EWX/155,90/stations"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gridpoints/EWX/155,90/forecast/hourly"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
    let provider = WeatherProvider::with_client(client);

    let result = provider.current_conditions(LAT, LON).await;
    assert!(matches!(
        result,
        Err(NwsError::RequestFailed { status: 500, .. })
    ));
}

#[tokio::test]
async fn endpoint_lookup_happens_once_across_methods() {
    let mock_server = MockServer::start().await;
    // mount_points asserts a single /points call via expect(1).
    mount_points(&mock_server).await;
    mount_stations(&mock_server, &[]).await;
    mount_hourly(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/EWX/155,90/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "properties": { "periods": [] }
        })))
        .mount(&mock_server)
        .await;

    let client = NwsClient::with_base_url(&mock_server.uri()).unwrap();
    let provider = WeatherProvider::with_client(client);

    provider.current_conditions(LAT, LON).await.unwrap();
    let hourly = provider.hourly_forecast(LAT, LON).await.unwrap();
    let daily = provider.daily_forecast(LAT, LON).await.unwrap();

    assert_eq!(hourly.len(), 1);
    assert!(daily.is_empty());
    assert_eq!(provider.cache().len(), 1);
}
