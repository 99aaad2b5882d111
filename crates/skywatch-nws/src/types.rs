//! Response models for the api.weather.gov GeoJSON endpoints.
//!
//! Every upstream field the dashboard does not strictly need is
//! optional with a default, so partial payloads from individual
//! stations never fail the whole decode.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// A measured value with its upstream unit code (e.g. `wmoUnit:degC`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(default)]
    pub unit_code: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// `/points/{lat},{lon}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PointsResponse {
    pub properties: PointInfo,
}

/// Point metadata: downstream endpoint URLs and zone reference URLs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointInfo {
    #[serde(default)]
    pub forecast: Option<String>,
    #[serde(default)]
    pub forecast_hourly: Option<String>,
    #[serde(default)]
    pub observation_stations: Option<String>,
    #[serde(default)]
    pub forecast_zone: Option<String>,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub fire_weather_zone: Option<String>,
}

/// The three endpoint URLs resolved for a coordinate, cached for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSet {
    pub forecast_url: String,
    pub hourly_forecast_url: String,
    pub stations_url: String,
}

/// Observation-station list response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationsResponse {
    #[serde(default)]
    pub features: Vec<StationFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationFeature {
    pub properties: StationInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationInfo {
    #[serde(default)]
    pub station_identifier: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// `/stations/{id}/observations/latest` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationResponse {
    #[serde(default)]
    pub properties: Option<ObservationRecord>,
}

/// Raw observation fields as reported by a station.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationRecord {
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub text_description: Option<String>,
    #[serde(default)]
    pub temperature: QuantitativeValue,
    #[serde(default)]
    pub relative_humidity: QuantitativeValue,
    #[serde(default)]
    pub wind_speed: QuantitativeValue,
    #[serde(default)]
    pub wind_gust: QuantitativeValue,
    #[serde(default)]
    pub wind_direction: QuantitativeValue,
}

/// Active-alerts response (GeoJSON feature collection).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub id: Option<String>,
    pub properties: AlertInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertInfo {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub certainty: Option<String>,
    #[serde(default)]
    pub effective: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub onset: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub ends: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub expires: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub area_desc: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub geocode: Geocode,
}

/// Geographic codes attached to an alert. UGC is the zone identifier
/// format used for zone-query filtering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geocode {
    #[serde(rename = "UGC", default)]
    pub ugc: Vec<String>,
    #[serde(rename = "SAME", default)]
    pub same: Vec<String>,
}

/// Forecast response, shared by the daily and hourly endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastPeriods,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastPeriods {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub is_daytime: Option<bool>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub temperature_unit: Option<String>,
    #[serde(default)]
    pub relative_humidity: QuantitativeValue,
    #[serde(default)]
    pub probability_of_precipitation: QuantitativeValue,
    #[serde(default)]
    pub wind_speed: Option<String>,
    #[serde(default)]
    pub wind_direction: Option<String>,
    #[serde(default)]
    pub short_forecast: Option<String>,
    #[serde(default)]
    pub detailed_forecast: Option<String>,
}
