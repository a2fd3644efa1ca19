//! Scripted stand-ins for the console and text-generation ports, and a
//! mock streaming `LlmClient`.

use std::collections::VecDeque;
use std::sync::Mutex;

use futures::future::BoxFuture;
use futures::stream::{self, BoxStream};

use daytrip_core::config::ModelConfig;
use daytrip_core::error::{DaytripError, Result};
use daytrip_core::traits::{Console, LlmClient, TextGenerator};
use daytrip_core::types::{ChatMessage, GenerationRequest, StopReason, StreamDelta};

/// Console that answers prompts from a fixed list of lines.
///
/// Once the list is exhausted every prompt fails with `Input`, like a
/// closed stdin.
pub struct ScriptedConsole {
    inputs: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    printed: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: Mutex::new(inputs.iter().map(|s| s.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
            printed: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Lines printed so far, in order.
    pub fn printed(&self) -> Vec<String> {
        self.printed.lock().unwrap().clone()
    }
}

impl Console for ScriptedConsole {
    fn prompt_line(&self, prompt: &str) -> BoxFuture<'_, Result<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.inputs.lock().unwrap().pop_front();
        Box::pin(async move {
            next.ok_or_else(|| DaytripError::Input("scripted input exhausted".to_string()))
        })
    }

    fn print_line(&self, text: &str) -> BoxFuture<'_, Result<()>> {
        self.printed.lock().unwrap().push(text.to_string());
        Box::pin(async { Ok(()) })
    }
}

enum Reply {
    Text(String),
    Fail(Mutex<Option<DaytripError>>),
}

/// Text generator with a canned reply (or a canned failure).
pub struct ScriptedGenerator {
    reply: Reply,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails the first call with `error`; later calls fail with a generic
    /// request error.
    pub fn failing(error: DaytripError) -> Self {
        Self {
            reply: Reply::Fail(Mutex::new(Some(error))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'_, Result<String>> {
        self.requests.lock().unwrap().push(request);
        let outcome = match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(slot) => Err(slot
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| DaytripError::LlmRequest("scripted failure".to_string()))),
        };
        Box::pin(async move { outcome })
    }
}

/// LLM client that streams a fixed sequence of text chunks.
pub struct MockLlmClient {
    chunks: Vec<String>,
    request_error: Mutex<Option<DaytripError>>,
    stream_error: Mutex<Option<DaytripError>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockLlmClient {
    pub fn with_chunks(chunks: Vec<&str>) -> Self {
        Self {
            chunks: chunks.into_iter().map(String::from).collect(),
            request_error: Mutex::new(None),
            stream_error: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Rejects the request itself, before any stream is opened.
    pub fn failing(error: DaytripError) -> Self {
        let mock = Self::with_chunks(vec![]);
        *mock.request_error.lock().unwrap() = Some(error);
        mock
    }

    /// Streams `chunks`, then yields `error` instead of a stop marker.
    pub fn with_stream_error(chunks: Vec<&str>, error: DaytripError) -> Self {
        let mock = Self::with_chunks(chunks);
        *mock.stream_error.lock().unwrap() = Some(error);
        mock
    }

    /// Message lists received so far, one entry per request.
    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

impl LlmClient for MockLlmClient {
    fn chat_stream(
        &self,
        _config: &ModelConfig,
        messages: Vec<ChatMessage>,
    ) -> BoxFuture<'_, Result<BoxStream<'_, Result<StreamDelta>>>> {
        self.requests.lock().unwrap().push(messages);

        if let Some(err) = self.request_error.lock().unwrap().take() {
            return Box::pin(async move { Err(err) });
        }

        let mut deltas: Vec<Result<StreamDelta>> = self
            .chunks
            .iter()
            .map(|c| Ok(StreamDelta::TextDelta(c.clone())))
            .collect();
        match self.stream_error.lock().unwrap().take() {
            Some(err) => deltas.push(Err(err)),
            None => deltas.push(Ok(StreamDelta::Stop(StopReason::EndTurn))),
        }

        Box::pin(async move {
            Ok(Box::pin(stream::iter(deltas)) as BoxStream<'_, Result<StreamDelta>>)
        })
    }
}
