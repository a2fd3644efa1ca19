pub mod providers;
pub mod streaming;

use daytrip_core::config::ModelConfig;
use daytrip_core::error::{DaytripError, Result};
use daytrip_core::traits::LlmClient;

pub use providers::openai::OpenAiClient;
pub use providers::presets::{all_preset_names, get_preset, ProviderPreset};

/// Create an LLM client for the configured provider.
///
/// Every supported provider speaks the OpenAI chat completions protocol.
pub fn create_client(config: &ModelConfig) -> Result<Box<dyn LlmClient>> {
    if get_preset(&config.provider).is_none() && config.base_url.is_none() {
        return Err(DaytripError::UnsupportedProvider(format!(
            "{} (known: {}; or set model.base_url)",
            config.provider,
            all_preset_names().join(", ")
        )));
    }
    Ok(Box::new(OpenAiClient::new()))
}

/// Fill in preset defaults and the API key from the process environment.
pub fn resolve_model_config(config: &ModelConfig) -> Result<ModelConfig> {
    resolve_model_config_with(config, |name| std::env::var(name).ok())
}

/// Like [`resolve_model_config`], reading variables through `lookup`.
///
/// Fails with `MissingCredential` when the provider needs a key and neither
/// the config nor the environment supplies one.
pub fn resolve_model_config_with<F>(config: &ModelConfig, lookup: F) -> Result<ModelConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = config.clone();

    let Some(preset) = get_preset(&config.provider) else {
        if config.base_url.is_none() {
            return Err(DaytripError::UnsupportedProvider(config.provider.clone()));
        }
        // Custom endpoint: whatever key was configured is used as-is
        return Ok(resolved);
    };

    if resolved.base_url.is_none() {
        resolved.base_url = Some(preset.default_base_url.to_string());
    }
    resolved.extra_headers =
        providers::presets::build_extra_headers(&preset, &config.extra_headers);

    if let Some(env_var) = preset.api_key_env {
        if config.configured_api_key().is_none() {
            let key = lookup(env_var)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .ok_or_else(|| DaytripError::MissingCredential {
                    provider: config.provider.clone(),
                    env_var: env_var.to_string(),
                })?;
            resolved.api_key = Some(key);
        }
    }

    Ok(resolved)
}
