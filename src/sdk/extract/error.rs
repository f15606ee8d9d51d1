use std::time::Duration;
use thiserror::Error;

/// Failure of one extraction strategy. Always recoverable: the chain moves on
/// to the next strategy.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Language model request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Language model returned HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Language model response has no text content")]
    MissingContent,

    #[error("No JSON object found in reply")]
    NoJsonObject,

    #[error("Failed to parse extraction result: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Extraction result contains no locations")]
    NoLocations,

    #[error("Extraction timed out after {0:?}")]
    Timeout(Duration),

    #[error("All extraction strategies failed")]
    Exhausted,
}
