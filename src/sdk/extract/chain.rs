use super::pattern::{is_route_request, PatternExtractor};
use super::{ExtractionError, ExtractionResult, Extractor};
use std::time::Duration;

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

struct Strategy {
    extractor: Box<dyn Extractor>,
    deadline: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub result: ExtractionResult,
    /// Name of the strategy that produced `result`.
    pub strategy: String,
    pub is_route_request: bool,
}

/// Ordered extraction strategies; the first one to succeed wins.
#[derive(Default)]
pub struct ExtractionChain {
    strategies: Vec<Strategy>,
}

impl ExtractionChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Just the deterministic splitter.
    pub fn pattern_only() -> Self {
        Self::new().then(PatternExtractor)
    }

    /// Remote extractor raced against `deadline`, falling back to the splitter.
    pub fn with_fallback<E: Extractor + 'static>(remote: E, deadline: Duration) -> Self {
        Self::new()
            .then_within(remote, deadline)
            .then(PatternExtractor)
    }

    pub fn then<E: Extractor + 'static>(mut self, extractor: E) -> Self {
        self.strategies.push(Strategy {
            extractor: Box::new(extractor),
            deadline: None,
        });
        self
    }

    /// Adds a strategy whose attempt is abandoned once `deadline` passes.
    pub fn then_within<E: Extractor + 'static>(mut self, extractor: E, deadline: Duration) -> Self {
        self.strategies.push(Strategy {
            extractor: Box::new(extractor),
            deadline: Some(deadline),
        });
        self
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.extractor.name()).collect()
    }

    pub async fn extract(&self, text: &str) -> Result<ExtractionOutcome, ExtractionError> {
        for strategy in &self.strategies {
            let name = strategy.extractor.name();
            match run(strategy, text).await {
                Ok(result) => {
                    log::info!(
                        "Extracted {} locations with {}: {:?}",
                        result.locations.len(),
                        name,
                        result.locations
                    );
                    return Ok(ExtractionOutcome {
                        result,
                        strategy: name.to_string(),
                        is_route_request: is_route_request(text),
                    });
                }
                Err(e) => log::warn!("Extraction with {} failed, falling back: {}", name, e),
            }
        }
        Err(ExtractionError::Exhausted)
    }
}

async fn run(strategy: &Strategy, text: &str) -> Result<ExtractionResult, ExtractionError> {
    match strategy.deadline {
        // A late reply is dropped together with the future.
        Some(deadline) => tokio::time::timeout(deadline, strategy.extractor.extract(text))
            .await
            .map_err(|_| ExtractionError::Timeout(deadline))?,
        None => strategy.extractor.extract(text).await,
    }
}
