//! Unit conversions for upstream observation values.
//!
//! All converters are total: missing or non-finite inputs yield `None`
//! instead of panicking, so render code can fall back to a sentinel.

const KMH_TO_MPH: f64 = 0.621371;
const MS_TO_MPH: f64 = 2.23694;

/// 16-point compass rose, north first, clockwise.
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

pub fn celsius_to_fahrenheit(celsius: Option<f64>) -> Option<f64> {
    let c = celsius.filter(|v| v.is_finite())?;
    Some(c * 9.0 / 5.0 + 32.0)
}

/// Normalize a wind speed to mph based on the upstream unit code.
/// Unrecognized unit codes pass the value through unchanged.
pub fn wind_to_mph(value: Option<f64>, unit_code: Option<&str>) -> Option<f64> {
    let v = value.filter(|v| v.is_finite())?;
    let code = unit_code.unwrap_or("");
    if code.contains("km_h") || code.contains("km/h") {
        Some(v * KMH_TO_MPH)
    } else if code.contains("m_s") || code.contains("m/s") {
        Some(v * MS_TO_MPH)
    } else {
        // Covers mph itself and anything the station made up.
        Some(v)
    }
}

/// Map a bearing in degrees onto the 16-point compass rose.
pub fn deg_to_compass(degrees: Option<f64>) -> Option<&'static str> {
    let d = degrees.filter(|v| v.is_finite())?;
    let normalized = ((d % 360.0) + 360.0) % 360.0;
    let index = (normalized / 22.5).round() as usize % 16;
    Some(COMPASS_POINTS[index])
}
