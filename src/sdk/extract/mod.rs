pub mod chain;
pub mod error;
pub mod gemini;
pub mod llm;
pub mod mock;
pub mod pattern;
pub mod service;

use crate::sdk::routing::Profile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use chain::{ExtractionChain, ExtractionOutcome, DEFAULT_DEADLINE};
pub use error::ExtractionError;
pub use gemini::GeminiClient;
pub use llm::LanguageModelExtractor;
pub use mock::MockTextService;
pub use pattern::{extract_via_pattern, is_route_request, PatternExtractor};
pub use service::StructuredTextService;

/// Travel preferences as stated by the user. `None` means "not mentioned" and
/// is never forwarded upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPreferences {
    pub transport_mode: Option<String>,
    pub avoid_tolls: Option<bool>,
    pub avoid_highways: Option<bool>,
    pub avoid_ferries: Option<bool>,
}

impl TravelPreferences {
    /// The profile routes are computed for; unset or unknown modes mean driving.
    pub fn profile(&self) -> Profile {
        Profile::normalize(self.transport_mode.as_deref())
    }

    /// Returns a copy where every field set in `overrides` replaces ours.
    pub fn merged_with(&self, overrides: &TravelPreferences) -> TravelPreferences {
        TravelPreferences {
            transport_mode: overrides
                .transport_mode
                .clone()
                .or_else(|| self.transport_mode.clone()),
            avoid_tolls: overrides.avoid_tolls.or(self.avoid_tolls),
            avoid_highways: overrides.avoid_highways.or(self.avoid_highways),
            avoid_ferries: overrides.avoid_ferries.or(self.avoid_ferries),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractionResult {
    pub locations: Vec<String>,
    pub preferences: TravelPreferences,
}

/// One way of turning free text into locations and preferences.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_preferences_stay_unset() {
        let prefs: TravelPreferences =
            serde_json::from_str(r#"{"transportMode": null, "avoidTolls": true}"#).unwrap();
        assert_eq!(prefs.transport_mode, None);
        assert_eq!(prefs.avoid_tolls, Some(true));
        assert_eq!(prefs.avoid_highways, None);
        assert_eq!(prefs.avoid_ferries, None);
        assert_eq!(prefs.profile(), Profile::Driving);
    }

    #[test]
    fn overrides_win_only_where_set() {
        let base = TravelPreferences {
            transport_mode: Some("walking".to_string()),
            avoid_tolls: Some(true),
            avoid_highways: None,
            avoid_ferries: Some(false),
        };
        let overrides = TravelPreferences {
            transport_mode: Some("bike".to_string()),
            avoid_ferries: Some(true),
            ..TravelPreferences::default()
        };

        let merged = base.merged_with(&overrides);
        assert_eq!(merged.profile(), Profile::Cycling);
        assert_eq!(merged.avoid_tolls, Some(true));
        assert_eq!(merged.avoid_highways, None);
        assert_eq!(merged.avoid_ferries, Some(true));
    }
}
