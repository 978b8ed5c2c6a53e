//! Gemini `generateContent` backend.
//!
//! The instruction goes in as a text part and the photograph as an `inline_data` part. The
//! reply is unconstrained text, usually a JSON object inside a Markdown fence.

use crate::{http_error, status_error, ProviderBackend, ProviderReply};
use async_trait::async_trait;
use heridas_core::config::ProviderSettings;
use heridas_core::{ClassificationError, ClassificationResult, Provider};
use heridas_types::DataUri;
use serde::Deserialize;

pub struct GeminiBackend {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl GeminiBackend {
    pub fn new(client: reqwest::Client, settings: ProviderSettings) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url(),
            self.settings.model()
        )
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProviderBackend for GeminiBackend {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate(
        &self,
        image: &DataUri,
        instruction: &str,
    ) -> ClassificationResult<ProviderReply> {
        let provider = self.provider();
        let api_key = self
            .settings
            .api_key()
            .ok_or_else(|| ClassificationError::NotConfigured {
                provider: provider.display_name(),
                reason: "GEMINI_API_KEY is not set".into(),
            })?;

        let body = serde_json::json!({
            "contents": [{
                "parts": [
                    { "text": instruction },
                    {
                        "inline_data": {
                            "mime_type": image.mime_type(),
                            "data": image.base64_data(),
                        }
                    }
                ]
            }]
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| http_error(provider, e))?;

        if !response.status().is_success() {
            return Err(status_error(provider, response).await);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ClassificationError::MalformedReply(format!("Gemini envelope: {e}")))?;

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(ClassificationError::EmptyResponse {
                provider: provider.display_name(),
            });
        }
        Ok(ProviderReply::FreeForm(text))
    }
}
