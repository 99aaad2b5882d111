//! Plain data structures handed to the presentation layer.
//!
//! Everything here is already formatted or trivially formattable; the
//! presentation layer never touches raw API values.

use skywatch_nws::types::ForecastPeriod;

use crate::alerts::ActiveAlert;
use crate::format;
use crate::observation::Observation;
use crate::units;

/// Shown wherever a reading is missing.
pub const UNKNOWN_SENTINEL: &str = "--";

const DETAIL_URL_BASE: &str = "https://forecast.weather.gov/MapClick.php";

/// Where a current-conditions reading came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionsSource {
    Observation,
    HourlyForecast,
}

/// Render-ready current conditions.
#[derive(Debug, Clone)]
pub struct CurrentConditions {
    pub temperature_f: Option<i64>,
    pub description: String,
    pub humidity_percent: Option<i64>,
    pub wind: Option<String>,
    pub as_of: String,
    pub source: ConditionsSource,
}

impl CurrentConditions {
    pub fn from_observation(observation: &Observation) -> Self {
        let wind_mph = units::wind_to_mph(
            observation.wind_speed,
            observation.wind_speed_unit.as_deref(),
        );
        let gust_mph = units::wind_to_mph(
            observation.wind_gust,
            observation.wind_gust_unit.as_deref(),
        );
        let compass = units::deg_to_compass(observation.wind_direction_deg);

        Self {
            temperature_f: units::celsius_to_fahrenheit(observation.temperature_c)
                .map(|f| f.round() as i64),
            description: observation.text_description.clone().unwrap_or_default(),
            humidity_percent: observation
                .humidity_percent
                .filter(|v| v.is_finite())
                .map(|v| v.round() as i64),
            wind: wind_string(wind_mph, gust_mph, compass),
            as_of: observation
                .timestamp
                .map(|ts| format::datetime_label(&ts.to_rfc3339()))
                .unwrap_or_default(),
            source: ConditionsSource::Observation,
        }
    }

    /// Fallback path when no station yields a usable observation.
    /// Forecast temperatures are already Fahrenheit unless flagged
    /// otherwise; forecast wind comes preformatted as text.
    pub fn from_forecast_period(period: ForecastPeriod) -> Self {
        let temperature_f = period
            .temperature
            .filter(|v| v.is_finite())
            .map(|t| {
                if period.temperature_unit.as_deref() == Some("C") {
                    (t * 9.0 / 5.0 + 32.0).round() as i64
                } else {
                    t.round() as i64
                }
            });

        let wind = period.wind_speed.as_ref().map(|speed| {
            match period.wind_direction.as_deref() {
                Some(direction) if !direction.is_empty() => format!("{speed} {direction}"),
                _ => speed.clone(),
            }
        });

        Self {
            temperature_f,
            description: period.short_forecast.unwrap_or_default(),
            humidity_percent: period
                .relative_humidity
                .value
                .filter(|v| v.is_finite())
                .map(|v| v.round() as i64),
            wind,
            as_of: period
                .start_time
                .map(|ts| format::datetime_label(&ts.to_rfc3339()))
                .unwrap_or_default(),
            source: ConditionsSource::HourlyForecast,
        }
    }

    pub fn temperature_label(&self) -> String {
        self.temperature_f
            .map(|t| format!("{t}°F"))
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string())
    }

    pub fn humidity_label(&self) -> String {
        self.humidity_percent
            .map(|h| format!("{h}%"))
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string())
    }

    pub fn wind_label(&self) -> String {
        self.wind
            .clone()
            .unwrap_or_else(|| UNKNOWN_SENTINEL.to_string())
    }
}

/// `"12 mph NW (gusts 20 mph)"` with absent segments omitted; `None`
/// when there is no speed at all.
fn wind_string(
    wind_mph: Option<f64>,
    gust_mph: Option<f64>,
    compass: Option<&'static str>,
) -> Option<String> {
    let speed = wind_mph?;
    let mut label = format!("{:.0} mph", speed);
    if let Some(compass) = compass {
        label.push(' ');
        label.push_str(compass);
    }
    if let Some(gust) = gust_mph {
        label.push_str(&format!(" (gusts {gust:.0} mph)"));
    }
    Some(label)
}

/// One row of the rendered alert list.
#[derive(Debug, Clone)]
pub struct AlertView {
    pub title: String,
    pub severity: String,
    pub urgency: String,
    pub certainty: String,
    pub time_window: String,
    pub area: String,
    pub description: String,
    pub instruction: Option<String>,
    /// True only for the placeholder row shown when no alerts are
    /// active.
    pub is_empty_state: bool,
}

impl AlertView {
    pub fn from_alert(alert: &ActiveAlert) -> Self {
        let start = alert.onset.or(alert.effective);
        let end = alert.ends.or(alert.expires);
        let time_window = match (start, end) {
            (Some(start), Some(end)) => format!(
                "{} – {}",
                format::datetime_label(&start.to_rfc3339()),
                format::datetime_label(&end.to_rfc3339())
            ),
            (Some(start), None) => {
                format!("from {}", format::datetime_label(&start.to_rfc3339()))
            }
            (None, Some(end)) => {
                format!("until {}", format::datetime_label(&end.to_rfc3339()))
            }
            (None, None) => String::new(),
        };

        Self {
            title: alert.headline.clone().unwrap_or_else(|| alert.event.clone()),
            severity: alert.severity_label.clone(),
            urgency: alert.urgency.clone(),
            certainty: alert.certainty.clone(),
            time_window,
            area: alert.area_description.clone(),
            description: alert.description.clone(),
            instruction: alert.instruction.clone(),
            is_empty_state: false,
        }
    }

    fn empty_state() -> Self {
        Self {
            title: "No active alerts".to_string(),
            severity: String::new(),
            urgency: String::new(),
            certainty: String::new(),
            time_window: String::new(),
            area: String::new(),
            description: "There are no active weather alerts for this location.".to_string(),
            instruction: None,
            is_empty_state: true,
        }
    }
}

/// Alert rows for display; a single empty-state row when the feed is
/// empty.
pub fn alert_list(alerts: &[ActiveAlert]) -> Vec<AlertView> {
    if alerts.is_empty() {
        vec![AlertView::empty_state()]
    } else {
        alerts.iter().map(AlertView::from_alert).collect()
    }
}

/// One column of the hourly chart.
#[derive(Debug, Clone)]
pub struct HourlyPoint {
    pub label: String,
    pub temperature_f: Option<i64>,
    pub precip_chance_percent: Option<i64>,
    pub short_forecast: String,
}

/// Chart-ready points from hourly forecast periods.
pub fn hourly_points(periods: &[ForecastPeriod]) -> Vec<HourlyPoint> {
    periods
        .iter()
        .map(|period| HourlyPoint {
            label: period
                .start_time
                .map(|ts| format::hour_label(&ts.to_rfc3339()))
                .unwrap_or_default(),
            temperature_f: period
                .temperature
                .filter(|v| v.is_finite())
                .map(|t| t.round() as i64),
            precip_chance_percent: period
                .probability_of_precipitation
                .value
                .filter(|v| v.is_finite())
                .map(|v| v.round() as i64),
            short_forecast: period.short_forecast.clone().unwrap_or_default(),
        })
        .collect()
}

/// Summary card for a tracked location.
#[derive(Debug, Clone)]
pub struct LocationCard {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `None` means the alert feed could not be fetched.
    pub alert_count: Option<usize>,
}

impl LocationCard {
    pub fn alert_summary(&self) -> String {
        match self.alert_count {
            Some(0) => "No active alerts".to_string(),
            Some(1) => "1 active alert".to_string(),
            Some(n) => format!("{n} active alerts"),
            None => "Unavailable".to_string(),
        }
    }

    /// Outbound link to the full forecast page for this location.
    pub fn detail_url(&self) -> String {
        format!(
            "{DETAIL_URL_BASE}?lat={}&lon={}",
            self.latitude, self.longitude
        )
    }
}
