use std::env;
use std::time::Duration;
use thiserror::Error;

use super::extract::{gemini, DEFAULT_DEADLINE};
use super::routing::provider::remote;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("Environment variable {name} has invalid value {value:?}: expected whole seconds")]
    InvalidSeconds { name: &'static str, value: String },
}

/// Language model credentials. Absent when no key is configured, in which
/// case only the pattern extractor runs.
#[derive(Debug, Clone)]
pub struct LanguageModelConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub mapbox_token: String,
    pub mapbox_base_url: String,
    pub language_model: Option<LanguageModelConfig>,
    pub extraction_deadline: Duration,
    pub http_timeout: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mapbox_token =
            get("MAPBOX_ACCESS_TOKEN").ok_or(ConfigError::Missing("MAPBOX_ACCESS_TOKEN"))?;
        let language_model = get("GEMINI_API_KEY").map(|api_key| LanguageModelConfig {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
        });

        Ok(Self {
            mapbox_token,
            mapbox_base_url: get("MAPBOX_BASE_URL")
                .unwrap_or_else(|| remote::DEFAULT_BASE_URL.to_string()),
            language_model,
            extraction_deadline: seconds(
                "EXTRACTION_TIMEOUT_SECS",
                get("EXTRACTION_TIMEOUT_SECS"),
                DEFAULT_DEADLINE,
            )?,
            http_timeout: seconds(
                "HTTP_TIMEOUT_SECS",
                get("HTTP_TIMEOUT_SECS"),
                DEFAULT_HTTP_TIMEOUT,
            )?,
        })
    }
}

fn seconds(
    name: &'static str,
    value: Option<String>,
    default: Duration,
) -> Result<Duration, ConfigError> {
    match value {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidSeconds { name, value }),
    }
}
