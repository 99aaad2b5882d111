//! NWS client error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NwsError {
    #[error("request timed out")]
    Timeout,

    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("endpoint metadata missing required URL: {0}")]
    EndpointResolutionFailed(String),

    #[error("no nearby station produced a usable observation")]
    NoUsableObservation,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

impl NwsError {
    /// User-friendly message for the rendering boundary.
    pub fn user_message(&self) -> String {
        match self {
            Self::Timeout => "The weather service took too long to respond.".to_string(),
            Self::RequestFailed { status, .. } => {
                format!("The weather service returned an error ({status}).")
            }
            Self::EndpointResolutionFailed(_) => {
                "Weather data is not available for this location.".to_string()
            }
            Self::NoUsableObservation => {
                "No nearby station is reporting conditions right now.".to_string()
            }
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Parse(_) => "The weather service sent an unreadable response.".to_string(),
        }
    }

    /// Whether a later refresh is likely to succeed without changes.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Network(_) | Self::RequestFailed { status: 500..=599, .. }
        )
    }
}
