//! OpenAI chat-completions backend.
//!
//! The instruction is sent as the system message and the photograph as an `image_url` part
//! holding the original data URI. `response_format` constrains the reply to a JSON object.

use crate::{http_error, status_error, ProviderBackend, ProviderReply};
use async_trait::async_trait;
use heridas_core::config::ProviderSettings;
use heridas_core::{ClassificationError, ClassificationResult, Provider};
use heridas_types::DataUri;
use serde::Deserialize;

pub struct OpenAiBackend {
    client: reqwest::Client,
    settings: ProviderSettings,
}

impl OpenAiBackend {
    pub fn new(client: reqwest::Client, settings: ProviderSettings) -> Self {
        Self { client, settings }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

#[async_trait]
impl ProviderBackend for OpenAiBackend {
    fn provider(&self) -> Provider {
        Provider::ChatGpt
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
                reason: "OPENAI_API_KEY is not set".into(),
            })?;

        let body = serde_json::json!({
            "model": self.settings.model(),
            "messages": [
                { "role": "system", "content": instruction },
                {
                    "role": "user",
                    "content": [
                        { "type": "image_url", "image_url": { "url": image.as_str() } }
                    ]
                }
            ],
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.settings.base_url()))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| http_error(provider, e))?;

        if !response.status().is_success() {
            return Err(status_error(provider, response).await);
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| ClassificationError::MalformedReply(format!("OpenAI envelope: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(ClassificationError::EmptyResponse {
                provider: provider.display_name(),
            })?;

        Ok(ProviderReply::Structured(content))
    }
}
