//! # Heridas Gateway
//!
//! Classification gateway: sends the wound photograph and the instruction to one of two
//! interchangeable multimodal providers and normalises the reply into a
//! [`ClassificationRecord`].
//!
//! - [`gemini::GeminiBackend`] returns free-form text; code fences are stripped before parsing.
//! - [`openai::OpenAiBackend`] is asked for a JSON object and its reply is parsed directly.
//!
//! Calls are stateless: no caching, no deduplication, no retries.

pub mod fences;
pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use heridas_core::{
    ClassificationError, ClassificationRecord, ClassificationResult, Classifier, GatewayConfig,
    Provider, VocabularyPolicy,
};
use heridas_types::DataUri;
use std::sync::Arc;

pub use fences::strip_code_fences;
pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

/// Longest provider error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Raw text produced by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReply {
    /// The provider was constrained to emit a JSON object.
    Structured(String),
    /// Unconstrained text that may wrap the JSON object in Markdown fences.
    FreeForm(String),
}

impl ProviderReply {
    /// The text to hand to the JSON parser.
    pub fn into_json_text(self) -> String {
        match self {
            ProviderReply::Structured(text) => text.trim().to_string(),
            ProviderReply::FreeForm(text) => strip_code_fences(&text),
        }
    }
}

/// One external multimodal model.
#[async_trait]
pub trait ProviderBackend: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate(
        &self,
        image: &DataUri,
        instruction: &str,
    ) -> ClassificationResult<ProviderReply>;
}

/// Routes a classification to the selected backend and validates the reply.
#[derive(Clone)]
pub struct ClassificationGateway {
    gemini: Arc<dyn ProviderBackend>,
    chatgpt: Arc<dyn ProviderBackend>,
    vocabulary_policy: VocabularyPolicy,
}

impl ClassificationGateway {
    /// Builds both HTTP backends from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed (e.g. TLS backend failure).
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_backends(
            Arc::new(GeminiBackend::new(client.clone(), config.gemini.clone())),
            Arc::new(OpenAiBackend::new(client, config.openai.clone())),
            config.vocabulary_policy,
        ))
    }

    pub fn with_backends(
        gemini: Arc<dyn ProviderBackend>,
        chatgpt: Arc<dyn ProviderBackend>,
        vocabulary_policy: VocabularyPolicy,
    ) -> Self {
        Self {
            gemini,
            chatgpt,
            vocabulary_policy,
        }
    }

    fn backend(&self, provider: Provider) -> &dyn ProviderBackend {
        match provider {
            Provider::Gemini => self.gemini.as_ref(),
            Provider::ChatGpt => self.chatgpt.as_ref(),
        }
    }
}

#[async_trait]
impl Classifier for ClassificationGateway {
    async fn classify(
        &self,
        provider: Provider,
        image: &DataUri,
        instruction: &str,
    ) -> ClassificationResult<ClassificationRecord> {
        tracing::debug!(%provider, image = %image, "sending classification request");
        let reply = self.backend(provider).generate(image, instruction).await?;

        let text = reply.into_json_text();
        if text.is_empty() {
            return Err(ClassificationError::EmptyResponse {
                provider: provider.display_name(),
            });
        }

        let record = ClassificationRecord::from_reply(&text)?;

        let violations = record.vocabulary_violations();
        if !violations.is_empty() {
            match self.vocabulary_policy {
                VocabularyPolicy::Flag => {
                    for v in &violations {
                        tracing::warn!(%provider, field = %v.field, value = %v.value, "value outside closed vocabulary");
                    }
                }
                VocabularyPolicy::Reject => {
                    return Err(ClassificationError::OutOfVocabulary(violations));
                }
            }
        }

        Ok(record)
    }
}

/// Maps a transport failure to the gateway error.
pub(crate) fn http_error(provider: Provider, err: reqwest::Error) -> ClassificationError {
    ClassificationError::Http {
        provider: provider.display_name(),
        message: err.to_string(),
    }
}

/// Turns a non-success response into the gateway error, keeping a bounded body excerpt.
pub(crate) async fn status_error(
    provider: Provider,
    response: reqwest::Response,
) -> ClassificationError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ClassificationError::ProviderStatus {
        provider: provider.display_name(),
        status,
        body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    pub(crate) async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub(crate) const IMAGE: &str = "data:image/png;base64,aG9sYQ==";

    pub(crate) fn reply_json() -> serde_json::Value {
        serde_json::json!({
            "etiologia_probable": "Lesión por presión (LPP)",
            "tejido_predominante": "Tejido esfacelado",
            "nivel_exudado": "Mojado / saturado",
            "piel_perilesional": "Macerada (Color blanquecino, aspecto húmedo y frágil por exceso de exudado)",
            "signos_infeccion": "Sospecha de infección local",
            "objetivo_aposito": "Gestionar exudado / Absorción (Controlar exceso de líquido; ej. Alginatos, Fibras, Espumas)",
            "aposito_primario": "Alginato cálcico o Fibra gelificante (Hidrofibra)",
            "recomendaciones_cuidados": "- Cambios posturales cada 2 horas"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{reply_json, IMAGE};
    use std::sync::Mutex;

    struct FakeBackend {
        provider: Provider,
        reply: ClassificationResult<ProviderReply>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeBackend {
        fn new(provider: Provider, reply: ClassificationResult<ProviderReply>) -> Arc<Self> {
            Arc::new(Self {
                provider,
                reply,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProviderBackend for FakeBackend {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn generate(
            &self,
            image: &DataUri,
            instruction: &str,
        ) -> ClassificationResult<ProviderReply> {
            self.calls
                .lock()
                .unwrap()
                .push((image.as_str().to_string(), instruction.to_string()));
            self.reply.clone()
        }
    }

    fn gateway(
        gemini: ClassificationResult<ProviderReply>,
        chatgpt: ClassificationResult<ProviderReply>,
        policy: VocabularyPolicy,
    ) -> (ClassificationGateway, Arc<FakeBackend>, Arc<FakeBackend>) {
        let g = FakeBackend::new(Provider::Gemini, gemini);
        let c = FakeBackend::new(Provider::ChatGpt, chatgpt);
        (
            ClassificationGateway::with_backends(g.clone(), c.clone(), policy),
            g,
            c,
        )
    }

    fn image() -> DataUri {
        DataUri::parse(IMAGE).unwrap()
    }

    #[tokio::test]
    async fn test_fenced_reply_yields_same_record_as_plain_reply() {
        let plain = reply_json().to_string();
        let fenced = format!("```json\n{plain}\n```");
        let (gw, _, _) = gateway(
            Ok(ProviderReply::FreeForm(fenced)),
            Ok(ProviderReply::Structured(plain)),
            VocabularyPolicy::Flag,
        );

        let from_fenced = gw.classify(Provider::Gemini, &image(), "x").await.unwrap();
        let from_plain = gw.classify(Provider::ChatGpt, &image(), "x").await.unwrap();
        assert_eq!(from_fenced, from_plain);
        assert_eq!(from_fenced.etiology, "Lesión por presión (LPP)");
    }

    #[tokio::test]
    async fn test_routes_to_selected_backend_with_unchanged_inputs() {
        let reply = Ok(ProviderReply::Structured(reply_json().to_string()));
        let (gw, g, c) = gateway(reply.clone(), reply, VocabularyPolicy::Flag);

        gw.classify(Provider::ChatGpt, &image(), "instruction")
            .await
            .unwrap();
        assert!(g.calls().is_empty());
        assert_eq!(
            c.calls(),
            vec![(IMAGE.to_string(), "instruction".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_reply_is_an_error() {
        let (gw, _, _) = gateway(
            Ok(ProviderReply::FreeForm("```json\n```".into())),
            Ok(ProviderReply::Structured(String::new())),
            VocabularyPolicy::Flag,
        );
        assert!(matches!(
            gw.classify(Provider::Gemini, &image(), "x").await,
            Err(ClassificationError::EmptyResponse { provider: "Gemini" })
        ));
        assert!(matches!(
            gw.classify(Provider::ChatGpt, &image(), "x").await,
            Err(ClassificationError::EmptyResponse { provider: "ChatGPT" })
        ));
    }

    #[tokio::test]
    async fn test_backend_error_is_propagated_unchanged() {
        let (gw, _, _) = gateway(
            Err(ClassificationError::NotConfigured {
                provider: "Gemini",
                reason: "GEMINI_API_KEY is not set".into(),
            }),
            Ok(ProviderReply::Structured(String::new())),
            VocabularyPolicy::Flag,
        );
        let err = gw.classify(Provider::Gemini, &image(), "x").await.unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[tokio::test]
    async fn test_out_of_vocabulary_values_follow_policy() {
        let mut value = reply_json();
        value["nivel_exudado"] = serde_json::json!("Abundante");
        let reply = Ok(ProviderReply::Structured(value.to_string()));

        let (flagging, _, _) = gateway(reply.clone(), reply.clone(), VocabularyPolicy::Flag);
        let record = flagging
            .classify(Provider::ChatGpt, &image(), "x")
            .await
            .unwrap();
        assert_eq!(record.exudate_level, "Abundante");

        let (rejecting, _, _) = gateway(reply.clone(), reply, VocabularyPolicy::Reject);
        let err = rejecting
            .classify(Provider::ChatGpt, &image(), "x")
            .await
            .unwrap_err();
        assert!(
            matches!(err, ClassificationError::OutOfVocabulary(ref v) if v.len() == 1),
            "{err}"
        );
        assert!(err.to_string().contains("nivel_exudado='Abundante'"));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_malformed() {
        let (gw, _, _) = gateway(
            Ok(ProviderReply::FreeForm("No puedo analizar esta imagen.".into())),
            Ok(ProviderReply::Structured("{}".into())),
            VocabularyPolicy::Flag,
        );
        assert!(matches!(
            gw.classify(Provider::Gemini, &image(), "x").await,
            Err(ClassificationError::MalformedReply(_))
        ));
        assert!(matches!(
            gw.classify(Provider::ChatGpt, &image(), "x").await,
            Err(ClassificationError::MalformedReply(_))
        ));
    }
}
