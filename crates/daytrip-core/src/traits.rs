use futures::future::BoxFuture;
use futures::stream::BoxStream;

use crate::config::ModelConfig;
use crate::error::Result;
use crate::types::*;

/// LLM client — streaming chat completions.
pub trait LlmClient: Send + Sync + 'static {
    /// Send a chat request and receive a stream of deltas.
    fn chat_stream(
        &self,
        config: &ModelConfig,
        messages: Vec<ChatMessage>,
    ) -> BoxFuture<'_, Result<BoxStream<'_, Result<StreamDelta>>>>;
}

/// Text generation — one request in, one complete text out.
pub trait TextGenerator: Send + Sync + 'static {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'_, Result<String>>;
}

/// Line-oriented console used by interactive steps.
pub trait Console: Send + Sync + 'static {
    /// Write `prompt`, then read one line with its terminator removed.
    fn prompt_line(&self, prompt: &str) -> BoxFuture<'_, Result<String>>;

    /// Write a line of output.
    fn print_line(&self, text: &str) -> BoxFuture<'_, Result<()>>;
}
