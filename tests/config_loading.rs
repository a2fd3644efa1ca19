use std::io::Write;

use daytrip_core::config::AppConfig;
use daytrip_core::error::DaytripError;

#[test]
fn test_load_full_config_from_file() {
    let toml_content = r#"
[model]
provider = "openai"
model_id = "gpt-4o-mini"
api_key = "sk-test-key"
base_url = "https://proxy.example.com/v1/chat/completions"
max_tokens = 2048
temperature = 0.5

[model.extra_headers]
X-Team = "travel"

[planner]
opening_message = "Help me plan a Saturday."
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");

    assert_eq!(config.model.provider, "openai");
    assert_eq!(config.model.model_id, "gpt-4o-mini");
    assert_eq!(config.model.api_key, Some("sk-test-key".to_string()));
    assert_eq!(
        config.model.base_url.as_deref(),
        Some("https://proxy.example.com/v1/chat/completions")
    );
    assert_eq!(config.model.max_tokens, 2048);
    assert_eq!(config.model.temperature, 0.5);
    assert_eq!(
        config.model.extra_headers.get("X-Team").map(String::as_str),
        Some("travel")
    );
    assert_eq!(config.planner.opening_message, "Help me plan a Saturday.");
}

#[test]
fn test_env_var_expansion_in_config() {
    std::env::set_var("DAYTRIP_TEST_API_KEY", "expanded-key-value");

    let toml_content = r#"
[model]
api_key = "${DAYTRIP_TEST_API_KEY}"
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");
    assert_eq!(config.model.api_key, Some("expanded-key-value".to_string()));
    assert_eq!(config.model.configured_api_key(), Some("expanded-key-value"));

    std::env::remove_var("DAYTRIP_TEST_API_KEY");
}

#[test]
fn test_unset_env_var_leaves_key_unconfigured() {
    let toml_content = r#"
[model]
api_key = "${DAYTRIP_TEST_NEVER_SET_KEY}"
"#;

    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(toml_content.as_bytes()).expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");
    assert_eq!(
        config.model.api_key.as_deref(),
        Some("${DAYTRIP_TEST_NEVER_SET_KEY}")
    );
    assert!(config.model.configured_api_key().is_none());
}

#[test]
fn test_minimal_config_uses_defaults() {
    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(b"[planner]\n").expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");

    assert_eq!(config.model.provider, "groq");
    assert_eq!(config.model.model_id, "llama-3.3-70b-versatile");
    assert_eq!(config.model.max_tokens, 1024);
    assert!(config.model.base_url.is_none());
    assert!(config.model.extra_headers.is_empty());
    assert_eq!(config.planner.opening_message, "I want to plan a day trip.");
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(b"[model]\nmax_tokens = \"lots\"\n")
        .expect("write toml");

    let err = AppConfig::load(tmp.path()).expect_err("should fail");
    assert!(matches!(err, DaytripError::Config(_)));
    assert!(err.is_config());
}

#[test]
fn test_config_round_trips_through_display() {
    let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
    tmp.write_all(b"[model]\napi_key = \"sk-secret\"\n")
        .expect("write toml");

    let config = AppConfig::load(tmp.path()).expect("load config");
    let shown = toml::to_string_pretty(&config.redacted()).expect("serialize");
    assert!(!shown.contains("sk-secret"));

    let reparsed = AppConfig::parse(&shown).expect("reparse");
    assert_eq!(reparsed.model.provider, config.model.provider);
    assert_eq!(reparsed.model.model_id, config.model.model_id);
}
