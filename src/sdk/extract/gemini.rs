use super::error::ExtractionError;
use super::service::StructuredTextService;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ExtractionError> {
        Ok(Self {
            http: Client::builder().timeout(timeout).build()?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Pulls the generated text out of a `generateContent` response.
pub fn reply_text(body: &Value) -> Option<&str> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(|text| text.as_str())
}

/// Maps a `generateContent` response status and body onto the reply text.
fn decode_reply(status: u16, body: &str) -> Result<String, ExtractionError> {
    if !(200..300).contains(&status) {
        return Err(ExtractionError::ServiceError {
            status,
            body: body.to_string(),
        });
    }

    let v: Value = serde_json::from_str(body)?;
    reply_text(&v)
        .map(str::to_string)
        .ok_or(ExtractionError::MissingContent)
}

#[async_trait]
impl StructuredTextService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ExtractionError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.1 }
        });

        log::debug!("[EXTRACT] Calling {} with model {}", self.name(), self.model);
        let resp = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        decode_reply(status.as_u16(), &text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
