use async_trait::async_trait;
use tracing::debug;

use crate::error::GenerationError;
use crate::models::{GenerateContentRequest, GenerateContentResponse};

/// The external text-generation service as seen by a controller.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

// Gemini generateContent client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str, api_key: &str) -> Self {
        // add https:// if not present
        let base_url = if base_url.starts_with("http") {
            base_url.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", base_url.trim_end_matches('/'))
        };
        Self {
            client,
            base_url,
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut request = self
            .client
            .post(self.endpoint())
            .json(&GenerateContentRequest::from_prompt(prompt));
        if !self.api_key.is_empty() {
            request = request.header("x-goog-api-key", &self.api_key);
        }

        let res = request.send().await?;
        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "generateContent answered");

        if !status.is_success() {
            return Err(GenerationError::Status { status, body });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed
            .first_text()
            .map(str::to_string)
            .ok_or(GenerationError::EmptyResponse)
    }
}
