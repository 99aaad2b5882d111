//! Active-alert aggregation.
//!
//! Alerts for a point are fetched two ways at once: a point query and
//! one query per administrative zone covering the point. The merged
//! feed is deduplicated by identity key and sorted most-severe first.
//! A single failing query degrades to an empty result; "no alerts" is
//! a normal outcome, not an error.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, Utc};
use futures::future::join_all;
use tracing::{debug, warn};

use skywatch_nws::types::{AlertFeature, PointInfo};
use skywatch_nws::{NwsClient, NwsError};

/// Standardized alert severity, ranked for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Extreme,
    Severe,
    Moderate,
    Minor,
    Unknown,
    Unrecognized,
}

impl Severity {
    pub fn from_label(label: Option<&str>) -> Self {
        match label.unwrap_or("") {
            "Extreme" => Self::Extreme,
            "Severe" => Self::Severe,
            "Moderate" => Self::Moderate,
            "Minor" => Self::Minor,
            "Unknown" => Self::Unknown,
            _ => Self::Unrecognized,
        }
    }

    /// Sort rank, highest first in the feed.
    pub fn rank(self) -> u8 {
        match self {
            Self::Extreme => 5,
            Self::Severe => 4,
            Self::Moderate => 3,
            Self::Minor => 2,
            Self::Unknown => 1,
            Self::Unrecognized => 0,
        }
    }
}

/// One alert in the aggregated feed, unique by `id`.
#[derive(Debug, Clone)]
pub struct ActiveAlert {
    pub id: String,
    pub event: String,
    pub headline: Option<String>,
    pub severity: Severity,
    pub severity_label: String,
    pub urgency: String,
    pub certainty: String,
    pub onset: Option<DateTime<FixedOffset>>,
    pub effective: Option<DateTime<FixedOffset>>,
    pub ends: Option<DateTime<FixedOffset>>,
    pub expires: Option<DateTime<FixedOffset>>,
    pub area_description: String,
    pub description: String,
    pub instruction: Option<String>,
    pub zone_codes: Vec<String>,
}

impl ActiveAlert {
    pub fn from_feature(feature: AlertFeature) -> Self {
        let info = feature.properties;
        let event = info.event.clone().unwrap_or_else(|| "Weather Alert".to_string());
        let earliest = [info.onset, info.effective, info.ends, info.expires]
            .into_iter()
            .flatten()
            .min();
        let id = feature
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| match earliest {
                Some(timestamp) => format!("{event}|{}", timestamp.to_rfc3339()),
                None => format!("{event}|unknown"),
            });

        Self {
            id,
            event,
            headline: info.headline,
            severity: Severity::from_label(info.severity.as_deref()),
            severity_label: info.severity.unwrap_or_else(|| "Unknown".to_string()),
            urgency: info.urgency.unwrap_or_else(|| "Unknown".to_string()),
            certainty: info.certainty.unwrap_or_else(|| "Unknown".to_string()),
            onset: info.onset,
            effective: info.effective,
            ends: info.ends,
            expires: info.expires,
            area_description: info.area_desc.unwrap_or_default(),
            description: info.description.unwrap_or_default(),
            instruction: info.instruction,
            zone_codes: info.geocode.ugc,
        }
    }

    /// Secondary sort key: first of onset, effective, now.
    fn sort_time(&self, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        self.onset.or(self.effective).unwrap_or(now)
    }
}

/// Pull the zone code out of a zone reference URL (its last path
/// segment). Malformed references yield `None` and are dropped.
fn zone_code_from_url(url: &str) -> Option<String> {
    let segment = url.trim_end_matches('/').rsplit('/').next()?;
    if segment.is_empty() || segment.contains(':') {
        return None;
    }
    Some(segment.to_string())
}

/// Zone codes covering a point: forecast zone, county zone and
/// fire-weather zone, deduplicated in that order.
pub fn resolve_zone_codes(point: &PointInfo) -> Vec<String> {
    let mut seen = HashSet::new();
    [
        point.forecast_zone.as_deref(),
        point.county.as_deref(),
        point.fire_weather_zone.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter_map(zone_code_from_url)
    .filter(|code| seen.insert(code.clone()))
    .collect()
}

/// Fetch, merge, deduplicate and sort the active alerts for a point.
pub async fn aggregate_alerts(
    client: &NwsClient,
    latitude: f64,
    longitude: f64,
) -> Result<Vec<ActiveAlert>, NwsError> {
    let zone_codes = match client.points(latitude, longitude).await {
        Ok(point) => resolve_zone_codes(&point),
        Err(error) => {
            warn!(%error, "zone resolution failed, using the point query alone");
            Vec::new()
        }
    };
    debug!(zones = ?zone_codes, "alert zone codes resolved");

    let point_query = async {
        client
            .alerts_for_point(latitude, longitude)
            .await
            .map(|response| response.features)
    };

    let zone_queries = zone_codes.iter().map(|code| async move {
        client
            .alerts_for_zone(code)
            .await
            .map(|response| response.features)
    });

    let (point_outcome, zone_outcomes) = tokio::join!(point_query, join_all(zone_queries));

    for (code, outcome) in zone_codes.iter().zip(&zone_outcomes) {
        if let Err(error) = outcome {
            warn!(zone = %code, %error, "zone alert query degraded to empty");
        }
    }

    let point_features = match point_outcome {
        Ok(features) => features,
        Err(error) => {
            if zone_outcomes.iter().all(|outcome| outcome.is_err()) {
                // Nothing succeeded; an empty feed here would read as
                // "no alerts", which is a different terminal state.
                return Err(error);
            }
            warn!(%error, "point alert query degraded to empty");
            Vec::new()
        }
    };

    let zone_results: Vec<Vec<AlertFeature>> = zone_outcomes
        .into_iter()
        .map(|outcome| outcome.unwrap_or_default())
        .collect();

    Ok(merge_alerts(point_features, zone_results, &zone_codes, Utc::now()))
}

/// Merge point and zone query results into one feed.
///
/// Zone-query features are kept only when their own UGC list covers
/// one of the resolved zone codes; zone queries can return
/// neighboring-zone noise. Point results come first and win identity
/// collisions. The result is sorted by severity descending, then by
/// the first of (onset, effective, now) ascending.
pub fn merge_alerts(
    point_features: Vec<AlertFeature>,
    zone_results: Vec<Vec<AlertFeature>>,
    zone_codes: &[String],
    now: DateTime<Utc>,
) -> Vec<ActiveAlert> {
    let now = now.fixed_offset();
    let zone_set: HashSet<&str> = zone_codes.iter().map(String::as_str).collect();

    let zone_features = zone_results.into_iter().flatten().filter(|feature| {
        feature
            .properties
            .geocode
            .ugc
            .iter()
            .any(|code| zone_set.contains(code.as_str()))
    });

    let mut seen = HashSet::new();
    let mut alerts: Vec<ActiveAlert> = point_features
        .into_iter()
        .chain(zone_features)
        .map(ActiveAlert::from_feature)
        .filter(|alert| seen.insert(alert.id.clone()))
        .collect();

    alerts.sort_by(|a, b| {
        b.severity
            .rank()
            .cmp(&a.severity.rank())
            .then_with(|| a.sort_time(now).cmp(&b.sort_time(now)))
    });
    alerts
}
