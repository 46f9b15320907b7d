use config::Map;

use hovor::domain::AudioFormat;
use hovor::infrastructure::audio::TranscriptionProvider;
use hovor::presentation::config::{Environment, Settings, SettingsError};

fn vars(entries: &[(&str, &str)]) -> Map<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn given_no_variables_when_loading_then_defaults_apply_without_credentials() {
    let settings = Settings::load_from(Environment::Test, vars(&[])).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.llm.api_key(), None);
    assert_eq!(settings.transcription.api_key(), None);
    assert_eq!(settings.transcription.provider, TranscriptionProvider::OpenAi);
    assert_eq!(settings.transcription.language, "cs");
    assert_eq!(settings.transcription.max_upload_bytes, 25 * 1024 * 1024);
    assert!(!settings.logging.json);
    assert_eq!(
        settings.transcription.upload_policy().unwrap().allowed_formats,
        AudioFormat::DEFAULT_ALLOWED.to_vec()
    );
}

#[test]
fn given_openai_api_key_when_loading_then_both_sections_receive_it() {
    let settings =
        Settings::load_from(Environment::Test, vars(&[("OPENAI_API_KEY", "sk-live")])).unwrap();

    assert_eq!(settings.llm.api_key(), Some("sk-live"));
    assert_eq!(settings.transcription.api_key(), Some("sk-live"));
}

#[test]
fn given_blank_openai_api_key_when_loading_then_credential_counts_as_absent() {
    let settings =
        Settings::load_from(Environment::Test, vars(&[("OPENAI_API_KEY", "   ")])).unwrap();

    assert_eq!(settings.llm.api_key(), None);
    assert_eq!(settings.transcription.api_key(), None);
}

#[test]
fn given_port_and_app_port_when_loading_then_port_wins() {
    let settings = Settings::load_from(
        Environment::Test,
        vars(&[("APP__SERVER__PORT", "7000"), ("PORT", "9090")]),
    )
    .unwrap();

    assert_eq!(settings.server.port, 9090);
}

#[test]
fn given_app_variables_when_loading_then_they_override_defaults() {
    let settings = Settings::load_from(
        Environment::Test,
        vars(&[
            ("APP__SERVER__PORT", "7000"),
            ("APP__LLM__CHAT_MODEL", "gpt-4o"),
            ("APP__LLM__MAX_TOKENS", "256"),
            ("APP__TRANSCRIPTION__PROVIDER", "local"),
            ("APP__TRANSCRIPTION__MODEL", "base"),
            ("APP__TRANSCRIPTION__LANGUAGE", "en"),
            ("APP__TRANSCRIPTION__MAX_UPLOAD_BYTES", "1024"),
            ("APP__TRANSCRIPTION__ALLOWED_EXTENSIONS", ".wav,.ogg"),
        ]),
    )
    .unwrap();

    assert_eq!(settings.server.port, 7000);
    assert_eq!(settings.llm.chat_model, "gpt-4o");
    assert_eq!(settings.llm.max_tokens, 256);
    assert_eq!(settings.transcription.provider, TranscriptionProvider::Local);
    assert_eq!(settings.transcription.model_name(), "base");
    assert_eq!(settings.transcription.language, "en");

    let policy = settings.transcription.upload_policy().unwrap();
    assert_eq!(policy.max_upload_bytes, 1024);
    assert_eq!(
        policy.allowed_formats,
        vec![AudioFormat::Wav, AudioFormat::Ogg]
    );
}

#[test]
fn given_unknown_allowed_extension_when_loading_then_startup_fails() {
    let result = Settings::load_from(
        Environment::Test,
        vars(&[("APP__TRANSCRIPTION__ALLOWED_EXTENSIONS", ".wav,.flac")]),
    );

    assert!(matches!(
        result,
        Err(SettingsError::InvalidExtension(ext)) if ext == ".flac"
    ));
}

#[test]
fn given_variables_without_app_prefix_when_loading_then_they_are_ignored() {
    let settings = Settings::load_from(
        Environment::Test,
        vars(&[("SERVER__PORT", "1234"), ("APP_ENVIRONMENT", "prod")]),
    )
    .unwrap();

    assert_eq!(settings.server.port, 8000);
}
