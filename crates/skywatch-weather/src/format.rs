//! Human-readable time labels for the rendering boundary.
//!
//! Inputs are RFC 3339 timestamps as handed out by the API; malformed
//! input falls back to the raw string rather than failing the render.
//! Labels keep the offset embedded in the input, which is the local
//! time of the forecast office.

use chrono::DateTime;

/// "3 PM" style label for an hourly-forecast column.
pub fn hour_label(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%-I %p").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// "Aug 1, 3:15 PM" style label for alert windows and "as of" lines.
pub fn datetime_label(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%b %-d, %-I:%M %p").to_string(),
        Err(_) => raw.to_string(),
    }
}
