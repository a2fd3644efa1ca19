use std::sync::Arc;

use futures::future::BoxFuture;
use futures::StreamExt;
use tracing::{debug, warn};

use daytrip_core::config::ModelConfig;
use daytrip_core::error::Result;
use daytrip_core::traits::{LlmClient, TextGenerator};
use daytrip_core::types::{GenerationRequest, StopReason, StreamDelta};

/// Text generation backed by a streaming LLM client.
///
/// Streams one chat completion and concatenates its text deltas. Errors
/// from the request or the stream are returned as-is; nothing is retried.
pub struct LlmGenerator {
    llm: Arc<dyn LlmClient>,
    config: ModelConfig,
}

impl LlmGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, config: ModelConfig) -> Self {
        Self { llm, config }
    }

    /// Resolve credentials and build the client for `config`.
    ///
    /// Fails with `MissingCredential` before any request is made when the
    /// provider needs a key and none is available.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let resolved = daytrip_llm::resolve_model_config(config)?;
        let client = daytrip_llm::create_client(&resolved)?;
        Ok(Self::new(Arc::from(client), resolved))
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

impl TextGenerator for LlmGenerator {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'_, Result<String>> {
        Box::pin(async move {
            let mut stream = self
                .llm
                .chat_stream(&self.config, request.to_messages())
                .await?;

            let mut text = String::new();
            while let Some(delta) = stream.next().await {
                match delta? {
                    StreamDelta::TextDelta(chunk) => text.push_str(&chunk),
                    StreamDelta::Stop(StopReason::MaxTokens) => {
                        warn!(
                            max_tokens = self.config.max_tokens,
                            "Generation stopped at the token limit"
                        );
                    }
                    StreamDelta::Usage {
                        input_tokens,
                        output_tokens,
                    } => {
                        debug!(input_tokens, output_tokens, "Generation usage");
                    }
                    StreamDelta::Stop(_) | StreamDelta::MessageId(_) => {}
                }
            }

            debug!(model = %self.config.model_id, chars = text.len(), "Generation complete");
            Ok(text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daytrip_core::error::DaytripError;
    use daytrip_core::types::Role;
    use daytrip_test_utils::MockLlmClient;

    #[tokio::test]
    async fn test_concatenates_text_deltas() {
        let llm = Arc::new(MockLlmClient::with_chunks(vec!["Morning: ", "Louvre. ", "Evening: Seine."]));
        let generator = LlmGenerator::new(llm.clone(), ModelConfig::default());

        let text = generator
            .generate(GenerationRequest::new("system", "user"))
            .await
            .unwrap();
        assert_eq!(text, "Morning: Louvre. Evening: Seine.");

        let sent = llm.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0][0].role, Role::System);
        assert_eq!(sent[0][1].text(), "user");
    }

    #[tokio::test]
    async fn test_request_error_propagates() {
        let llm = Arc::new(MockLlmClient::failing(DaytripError::LlmRequest(
            "HTTP 401 Unauthorized: invalid api key".into(),
        )));
        let generator = LlmGenerator::new(llm, ModelConfig::default());

        let err = generator
            .generate(GenerationRequest::new("s", "u"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "LLM request failed: HTTP 401 Unauthorized: invalid api key"
        );
    }

    #[tokio::test]
    async fn test_mid_stream_error_propagates() {
        let llm = Arc::new(MockLlmClient::with_stream_error(
            vec!["partial"],
            DaytripError::LlmStream("connection reset".into()),
        ));
        let generator = LlmGenerator::new(llm, ModelConfig::default());

        let err = generator
            .generate(GenerationRequest::new("s", "u"))
            .await
            .unwrap_err();
        assert!(matches!(err, DaytripError::LlmStream(_)));
    }

    #[test]
    fn test_missing_key_stops_before_client() {
        let config = ModelConfig {
            provider: "deepseek".into(),
            ..ModelConfig::default()
        };
        let err = daytrip_llm::resolve_model_config_with(&config, |_| None)
            .and_then(|resolved| LlmGenerator::from_config(&resolved))
            .err()
            .unwrap();
        match err {
            DaytripError::MissingCredential { provider, env_var } => {
                assert_eq!(provider, "deepseek");
                assert_eq!(env_var, "DEEPSEEK_API_KEY");
            }
            other => panic!("Expected MissingCredential, got {:?}", other),
        }
    }

    #[test]
    fn test_from_config_keyless_provider() {
        let mut config = ModelConfig::default();
        config.provider = "ollama".into();
        config.model_id = "llama3.2".into();
        let generator = LlmGenerator::from_config(&config).unwrap();
        assert_eq!(
            generator.config().base_url.as_deref(),
            Some("http://localhost:11434/v1/chat/completions")
        );
    }
}
