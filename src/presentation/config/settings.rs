use std::path::PathBuf;

use config::{Config, ConfigError, File, Map};
use serde::Deserialize;

use crate::application::ports::CompletionOptions;
use crate::application::services::UploadPolicy;
use crate::domain::AudioFormat;
use crate::infrastructure::audio::{DEFAULT_WHISPER_API_MODEL, TranscriptionProvider};
use crate::infrastructure::llm::DEFAULT_OPENAI_BASE_URL;

use super::Environment;

const DEFAULT_LOCAL_WHISPER_MODEL: &str = "tiny";
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub transcription: TranscriptionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    /// Whisper size (`tiny`, `base`, ...) or repo id for `local`, API model for `openai`.
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub language: String,
    pub max_upload_bytes: u64,
    pub allowed_extensions: Vec<String>,
    #[serde(default)]
    pub staging_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("unsupported audio extension in allowed_extensions: {0}")]
    InvalidExtension(String),
}

impl Settings {
    /// Layers defaults, `appsettings.<env>.toml`, `APP__*` variables, and
    /// finally the well-known `OPENAI_API_KEY`, `PORT` and `LOG_FORMAT` variables.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        Self::load_from(environment, std::env::vars().collect())
    }

    /// Same as [`Settings::load`], reading variables from `vars` instead of the
    /// process environment.
    pub fn load_from(
        environment: Environment,
        vars: Map<String, String>,
    ) -> Result<Self, SettingsError> {
        let api_key = vars.get("OPENAI_API_KEY").cloned();
        let port = vars.get("PORT").cloned();
        // Only `json` switches the format; other values leave `logging.json` alone.
        let json_logs = vars
            .get("LOG_FORMAT")
            .filter(|v| v.trim().eq_ignore_ascii_case("json"))
            .map(|_| true);

        let default_extensions: Vec<String> = AudioFormat::DEFAULT_ALLOWED
            .iter()
            .map(|f| f.extension().to_string())
            .collect();

        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("llm.base_url", DEFAULT_OPENAI_BASE_URL)?
            .set_default("llm.chat_model", "gpt-4o-mini")?
            .set_default("llm.max_tokens", 500)?
            .set_default("llm.temperature", 0.7)?
            .set_default("transcription.provider", "openai")?
            .set_default("transcription.base_url", DEFAULT_OPENAI_BASE_URL)?
            .set_default("transcription.language", "cs")?
            .set_default(
                "transcription.max_upload_bytes",
                DEFAULT_MAX_UPLOAD_BYTES as i64,
            )?
            .set_default("transcription.allowed_extensions", default_extensions)?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("transcription.allowed_extensions")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override_option("llm.api_key", api_key.clone())?
            .set_override_option("transcription.api_key", api_key)?
            .set_override_option("server.port", port)?
            .set_override_option("logging.json", json_logs)?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.transcription.upload_policy()?;
        Ok(settings)
    }
}

impl LlmSettings {
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

impl TranscriptionSettings {
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    pub fn model_name(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) if !model.trim().is_empty() => model.trim(),
            (_, TranscriptionProvider::Local) => DEFAULT_LOCAL_WHISPER_MODEL,
            (_, TranscriptionProvider::OpenAi) => DEFAULT_WHISPER_API_MODEL,
        }
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.staging_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn upload_policy(&self) -> Result<UploadPolicy, SettingsError> {
        let allowed_formats = self
            .allowed_extensions
            .iter()
            .map(|ext| {
                AudioFormat::from_extension(ext)
                    .ok_or_else(|| SettingsError::InvalidExtension(ext.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(UploadPolicy {
            allowed_formats,
            max_upload_bytes: self.max_upload_bytes,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
