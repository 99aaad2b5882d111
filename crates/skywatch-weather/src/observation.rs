//! Nearest-station observation selection.
//!
//! Stations near a point vary wildly in what they report; the selector
//! polls a handful concurrently and keeps the most complete reading.

use chrono::{DateTime, FixedOffset};
use futures::future::join_all;
use tracing::debug;

use skywatch_nws::types::{ObservationRecord, StationFeature};
use skywatch_nws::{NwsClient, NwsError};

/// Upper bound on how many nearby stations are polled per refresh.
pub const MAX_CANDIDATE_STATIONS: usize = 10;

/// A current reading from a ground station.
#[derive(Debug, Clone)]
pub struct Observation {
    pub station_id: String,
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub text_description: Option<String>,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_speed_unit: Option<String>,
    pub wind_gust: Option<f64>,
    pub wind_gust_unit: Option<String>,
    pub wind_direction_deg: Option<f64>,
}

impl Observation {
    fn from_record(station_id: String, record: ObservationRecord) -> Self {
        Self {
            station_id,
            timestamp: record.timestamp,
            text_description: record.text_description,
            temperature_c: record.temperature.value,
            humidity_percent: record.relative_humidity.value,
            wind_speed: record.wind_speed.value,
            wind_speed_unit: record.wind_speed.unit_code,
            wind_gust: record.wind_gust.value,
            wind_gust_unit: record.wind_gust.unit_code,
            wind_direction_deg: record.wind_direction.value,
        }
    }

    /// Field-completeness score; higher wins.
    pub fn completeness_score(&self) -> u8 {
        let has_temperature = self.temperature_c.is_some();
        let has_description = self
            .text_description
            .as_deref()
            .is_some_and(|text| !text.is_empty());

        if has_temperature
            && self.humidity_percent.is_some()
            && self.wind_speed.is_some()
            && self.wind_direction_deg.is_some()
        {
            3
        } else if has_temperature && has_description {
            2
        } else if has_temperature || has_description {
            1
        } else {
            0
        }
    }
}

/// Poll the first [`MAX_CANDIDATE_STATIONS`] stations concurrently and
/// pick the most complete observation. Stations that fail or return no
/// body are dropped from the pool. Ties go to the *earlier* timestamp;
/// that ordering is what the display was built around, so it stays.
pub async fn select_best_observation(
    client: &NwsClient,
    stations: &[StationFeature],
) -> Result<Observation, NwsError> {
    let requests: Vec<_> = stations
        .iter()
        .take(MAX_CANDIDATE_STATIONS)
        .filter_map(|station| station.properties.station_identifier.clone())
        .map(|station_id| async move {
            match client.latest_observation(&station_id).await {
                Ok(response) => response
                    .properties
                    .map(|record| Observation::from_record(station_id, record)),
                Err(error) => {
                    debug!(station = %station_id, %error, "station observation skipped");
                    None
                }
            }
        })
        .collect();

    let mut candidates: Vec<Observation> =
        join_all(requests).await.into_iter().flatten().collect();

    if candidates.is_empty() {
        return Err(NwsError::NoUsableObservation);
    }

    candidates.sort_by(|a, b| {
        b.completeness_score()
            .cmp(&a.completeness_score())
            .then_with(|| timestamp_rank(a.timestamp).cmp(&timestamp_rank(b.timestamp)))
    });
    Ok(candidates.remove(0))
}

/// Observations without a timestamp sort after everything else at
/// equal score.
fn timestamp_rank(timestamp: Option<DateTime<FixedOffset>>) -> i64 {
    timestamp.map_or(i64::MAX, |t| t.timestamp_millis())
}
