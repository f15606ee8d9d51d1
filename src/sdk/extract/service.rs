use super::error::ExtractionError;
use async_trait::async_trait;

/// A remote text-generation service. The reply is free text that is expected
/// to contain one JSON object somewhere inside it.
#[async_trait]
pub trait StructuredTextService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, ExtractionError>;

    fn name(&self) -> &str;
}
