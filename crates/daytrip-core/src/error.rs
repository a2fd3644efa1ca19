use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaytripError {
    // Workflow configuration errors
    #[error("Step already registered: {0}")]
    DuplicateStep(String),

    #[error("Step not registered: {0}")]
    UnknownStep(String),

    #[error("Workflow has no entry step")]
    MissingEntry,

    #[error("Invalid workflow graph: {0}")]
    Graph(String),

    // Config errors
    #[error("Missing API key for provider {provider}: set {env_var} or model.api_key")]
    MissingCredential { provider: String, env_var: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    // Input errors
    #[error("Input error: {0}")]
    Input(String),

    // LLM errors
    #[error("LLM request failed: {0}")]
    LlmRequest(String),

    #[error("LLM streaming error: {0}")]
    LlmStream(String),

    #[error("LLM provider not supported: {0}")]
    UnsupportedProvider(String),

    #[error("LLM response parse error: {0}")]
    LlmParse(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DaytripError {
    /// Whether this error was caused by workflow wiring or configuration
    /// rather than by input or an external service.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::DuplicateStep(_)
                | Self::UnknownStep(_)
                | Self::MissingEntry
                | Self::Graph(_)
                | Self::MissingCredential { .. }
                | Self::Config(_)
                | Self::ConfigNotFound(_)
                | Self::UnsupportedProvider(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DaytripError>;
