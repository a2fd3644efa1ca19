use std::collections::HashMap;

/// A named provider preset for OpenAI-compatible APIs.
#[derive(Debug, Clone, Copy)]
pub struct ProviderPreset {
    pub default_base_url: &'static str,
    /// Environment variable holding the key; `None` for keyless local servers.
    pub api_key_env: Option<&'static str>,
    pub extra_headers: &'static [(&'static str, &'static str)],
}

/// Look up a provider preset by name.
pub fn get_preset(provider: &str) -> Option<ProviderPreset> {
    match provider {
        "openai" => Some(ProviderPreset {
            default_base_url: "https://api.openai.com/v1/chat/completions",
            api_key_env: Some("OPENAI_API_KEY"),
            extra_headers: &[],
        }),
        "groq" => Some(ProviderPreset {
            default_base_url: "https://api.groq.com/openai/v1/chat/completions",
            api_key_env: Some("GROQ_API_KEY"),
            extra_headers: &[],
        }),
        "ollama" => Some(ProviderPreset {
            default_base_url: "http://localhost:11434/v1/chat/completions",
            api_key_env: None,
            extra_headers: &[],
        }),
        "openrouter" => Some(ProviderPreset {
            default_base_url: "https://openrouter.ai/api/v1/chat/completions",
            api_key_env: Some("OPENROUTER_API_KEY"),
            extra_headers: &[("X-Title", "daytrip")],
        }),
        "together" => Some(ProviderPreset {
            default_base_url: "https://api.together.xyz/v1/chat/completions",
            api_key_env: Some("TOGETHER_API_KEY"),
            extra_headers: &[],
        }),
        "mistral" => Some(ProviderPreset {
            default_base_url: "https://api.mistral.ai/v1/chat/completions",
            api_key_env: Some("MISTRAL_API_KEY"),
            extra_headers: &[],
        }),
        "deepseek" => Some(ProviderPreset {
            default_base_url: "https://api.deepseek.com/v1/chat/completions",
            api_key_env: Some("DEEPSEEK_API_KEY"),
            extra_headers: &[],
        }),
        _ => None,
    }
}

/// Build extra headers from a preset + user config overrides.
pub fn build_extra_headers(
    preset: &ProviderPreset,
    user_headers: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = preset
        .extra_headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    // User overrides take precedence
    headers.extend(user_headers.iter().map(|(k, v)| (k.clone(), v.clone())));
    headers
}

/// List all known preset provider names.
pub fn all_preset_names() -> &'static [&'static str] {
    &[
        "openai",
        "groq",
        "ollama",
        "openrouter",
        "together",
        "mistral",
        "deepseek",
    ]
}
