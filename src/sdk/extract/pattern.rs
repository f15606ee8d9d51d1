use super::{ExtractionError, ExtractionResult, Extractor, TravelPreferences};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

static TRAILING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+$").expect("valid trailing punctuation pattern"));
static TO_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+to\s+").expect("valid separator pattern"));

const FROM_PREFIX: &str = "from ";

/// Splits "from A to B to C" style text into its location names.
///
/// Never fails; text without a separator comes back as a single location and
/// blank input comes back empty.
pub fn extract_via_pattern(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    let mut rest = TRAILING_PUNCTUATION.replace(trimmed, "").into_owned();

    if starts_with_from(&rest) {
        rest = rest[FROM_PREFIX.len()..].to_string();
    }

    TO_SEPARATOR
        .split(&rest)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether the text reads as a request for a route rather than a single place.
/// Only changes how a lone location is reported, never which locations are used.
pub fn is_route_request(text: &str) -> bool {
    starts_with_from(text.trim()) || text.to_lowercase().contains(" to ")
}

fn starts_with_from(text: &str) -> bool {
    text.get(..FROM_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(FROM_PREFIX))
}

/// Deterministic fallback strategy. Infers no preferences.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternExtractor;

#[async_trait]
impl Extractor for PatternExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractionResult, ExtractionError> {
        Ok(ExtractionResult {
            locations: extract_via_pattern(text),
            preferences: TravelPreferences::default(),
        })
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_a_to_b() {
        for (a, b) in [("Paris", "London"), ("New York", "Boston"), ("Rennes", "Saint-Malo")] {
            assert_eq!(extract_via_pattern(&format!("{} to {}", a, b)), vec![a, b]);
        }
    }

    #[test]
    fn strips_from_prefix_and_trailing_punctuation() {
        assert_eq!(
            extract_via_pattern("From Paris to London."),
            vec!["Paris", "London"]
        );
        assert_eq!(
            extract_via_pattern("  from Lyon TO Marseille?!  "),
            vec!["Lyon", "Marseille"]
        );
    }

    #[test]
    fn single_place_passes_through() {
        assert_eq!(extract_via_pattern("Paris"), vec!["Paris"]);
        assert_eq!(extract_via_pattern("from Paris"), vec!["Paris"]);
    }

    #[test]
    fn is_idempotent_on_its_own_output() {
        for input in ["From Paris to London.", "Paris", "Berlin to Prague to Vienna"] {
            for name in extract_via_pattern(input) {
                assert_eq!(extract_via_pattern(&name), vec![name.clone()]);
            }
        }
    }

    #[test]
    fn keeps_order_and_duplicates() {
        assert_eq!(
            extract_via_pattern("Paris to Lyon to Paris"),
            vec!["Paris", "Lyon", "Paris"]
        );
    }

    #[test]
    fn drops_empty_pieces() {
        assert!(extract_via_pattern("   ").is_empty());
        assert!(extract_via_pattern("...").is_empty());
        assert_eq!(extract_via_pattern("from  to London"), vec!["London"]);
    }

    #[test]
    fn does_not_split_inside_words() {
        assert_eq!(extract_via_pattern("Toronto"), vec!["Toronto"]);
        assert_eq!(extract_via_pattern("Tokyo to Osaka"), vec!["Tokyo", "Osaka"]);
    }

    #[test]
    fn detects_route_requests() {
        assert!(is_route_request("from Paris"));
        assert!(is_route_request("Paris to London"));
        assert!(!is_route_request("Paris"));
        assert!(!is_route_request("Toronto"));
    }

    #[tokio::test]
    async fn extractor_uses_default_preferences() {
        let result = PatternExtractor.extract("Paris to London").await.unwrap();
        assert_eq!(result.locations, vec!["Paris", "London"]);
        assert_eq!(result.preferences, TravelPreferences::default());
    }
}
