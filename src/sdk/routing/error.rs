use serde::Deserialize;
use thiserror::Error;

use super::profile::Profile;

/// Error body returned by the geocoding/directions API on non-2xx responses.
#[derive(Deserialize, Debug)]
pub struct MapboxErrorPayload {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("No usable locations: {0}")]
    Input(String),

    #[error("Could not find location: {location}")]
    NotFound { location: String },

    #[error("No {profile} route found between the given points")]
    NoRoute { profile: Profile },

    // Structured error from the API
    #[error("API Error (HTTP {status}, {code}): {message}")]
    ApiError {
        status: u16,
        code: String,
        message: String,
    },

    // Error body that isn't in the expected JSON format
    #[error("Unstructured API Error (HTTP {status}): {body}")]
    RawApiError { status: u16, body: String },

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl RoutingError {
    /// The rejection that is worth exactly one identical retry.
    pub fn is_structural_invalid(&self) -> bool {
        matches!(
            self,
            RoutingError::ApiError { status: 422, code, .. } if code == "InvalidInput"
        )
    }

    /// Transport, 5xx or unexpected-shape failures from either service.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RoutingError::ApiError { .. }
                | RoutingError::RawApiError { .. }
                | RoutingError::RequestError(_)
                | RoutingError::ParseError(_)
        )
    }

    /// Single message suitable for showing to the person who typed the query.
    pub fn user_message(&self) -> String {
        match self {
            RoutingError::Input(_) => {
                "Please enter at least one location, e.g. \"from Paris to London\".".to_string()
            }
            RoutingError::NotFound { location } => {
                format!("Could not find location: \"{}\".", location)
            }
            RoutingError::NoRoute { profile } => format!(
                "No {} route found. The distance may be too long for {}; try another travel mode.",
                profile,
                profile.as_str()
            ),
            _ => "The routing service is unavailable right now. Please try again later."
                .to_string(),
        }
    }
}
