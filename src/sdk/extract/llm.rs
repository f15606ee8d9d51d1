use super::service::StructuredTextService;
use super::{ExtractionError, ExtractionResult, Extractor, TravelPreferences};
use async_trait::async_trait;
use serde::Deserialize;

const EXTRACTION_PROMPT: &str = r#"Extract the locations and travel preferences from the trip
description below.

RULES:
- List every place name in the order it will be visited.
- Remove words like "from", "to", "through", "via", "between", "starting at", "ending at".
- transportMode is one of "driving", "walking", "cycling", or null if not mentioned.
- avoidTolls, avoidHighways and avoidFerries are true, false, or null if not mentioned.

Return JSON only:
{
  "locations": ["place 1", "place 2"],
  "preferences": {
    "transportMode": null,
    "avoidTolls": null,
    "avoidHighways": null,
    "avoidFerries": null
  }
}

Trip description: "#;

#[derive(Deserialize, Debug)]
struct ModelReply {
    #[serde(default)]
    locations: Vec<Option<String>>,
    #[serde(default)]
    preferences: Option<TravelPreferences>,
}

/// Returns the first balanced `{...}` block in `reply`.
///
/// Braces inside JSON string literals do not count towards the balance.
pub fn first_json_object(reply: &str) -> Option<&str> {
    let start = reply.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in reply[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&reply[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parses a model reply into an extraction result.
pub fn parse_model_reply(reply: &str) -> Result<ExtractionResult, ExtractionError> {
    let block = first_json_object(reply).ok_or(ExtractionError::NoJsonObject)?;
    let parsed: ModelReply = serde_json::from_str(block)?;

    let locations: Vec<String> = parsed
        .locations
        .into_iter()
        .flatten()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();
    if locations.is_empty() {
        return Err(ExtractionError::NoLocations);
    }

    Ok(ExtractionResult {
        locations,
        preferences: parsed.preferences.unwrap_or_default(),
    })
}

/// Extraction strategy backed by a remote language model.
pub struct LanguageModelExtractor<S> {
    service: S,
}

impl<S: StructuredTextService> LanguageModelExtractor<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<S: StructuredTextService> Extractor for LanguageModelExtractor<S> {
    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        let prompt = format!("{}{}", EXTRACTION_PROMPT, text);
        let reply = self.service.complete(&prompt).await?;
        log::debug!("[EXTRACT] {} replied: {}", self.service.name(), reply);
        parse_model_reply(&reply)
    }

    fn name(&self) -> &str {
        self.service.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::extract::MockTextService;

    #[test]
    fn finds_object_inside_prose_and_fences() {
        let reply = concat!(
            "Sure! Here you go:\n```json\n",
            "{\"locations\": [\"Paris\"], \"x\": {\"y\": 1}}\n```\n",
            "Anything else? {\"not\": \"this\"}"
        );
        assert_eq!(
            first_json_object(reply),
            Some("{\"locations\": [\"Paris\"], \"x\": {\"y\": 1}}")
        );
    }

    #[test]
    fn ignores_braces_in_strings() {
        let reply = r#"{"locations": ["A}B", "C\"{D"]} trailing"#;
        assert_eq!(first_json_object(reply), Some(r#"{"locations": ["A}B", "C\"{D"]}"#));
    }

    #[test]
    fn unbalanced_or_missing_object_is_none() {
        assert_eq!(first_json_object("no json here"), None);
        assert_eq!(first_json_object("{\"locations\": [\"Paris\""), None);
    }

    #[test]
    fn parses_locations_and_preferences() {
        let reply = concat!(
            r#"{"locations": [" Paris ", "", null, "London"], "#,
            r#""preferences": {"transportMode": "bike", "avoidTolls": true, "#,
            r#""avoidHighways": null}}"#
        );
        let result = parse_model_reply(reply).unwrap();
        assert_eq!(result.locations, vec!["Paris", "London"]);
        assert_eq!(result.preferences.transport_mode.as_deref(), Some("bike"));
        assert_eq!(result.preferences.avoid_tolls, Some(true));
        assert_eq!(result.preferences.avoid_highways, None);
        assert_eq!(result.preferences.avoid_ferries, None);
    }

    #[test]
    fn missing_preferences_are_unset() {
        let result = parse_model_reply(r#"{"locations": ["Paris", "Lyon"]}"#).unwrap();
        assert_eq!(result.preferences, TravelPreferences::default());
    }

    #[test]
    fn rejects_unusable_replies() {
        assert!(matches!(
            parse_model_reply("I could not find any places."),
            Err(ExtractionError::NoJsonObject)
        ));
        assert!(matches!(
            parse_model_reply("{locations: Paris}"),
            Err(ExtractionError::ParseError(_))
        ));
        assert!(matches!(
            parse_model_reply(r#"{"locations": []}"#),
            Err(ExtractionError::NoLocations)
        ));
    }

    #[tokio::test]
    async fn sends_text_inside_prompt() {
        let service = MockTextService::replying(r#"{"locations": ["Paris", "London"]}"#);
        let extractor = LanguageModelExtractor::new(service);

        let result = extractor.extract("from Paris to London").await.unwrap();
        assert_eq!(result.locations, vec!["Paris", "London"]);

        let prompts = extractor.service.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("from Paris to London"));
    }

    #[tokio::test]
    async fn service_failure_is_an_extraction_error() {
        let extractor = LanguageModelExtractor::new(MockTextService::failing());
        assert!(extractor.extract("Paris to London").await.is_err());
    }
}
