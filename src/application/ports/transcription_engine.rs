use std::path::Path;

use async_trait::async_trait;

use crate::domain::TranscriptionSource;

/// Raw engine output before it is shaped into a `Transcript`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTranscript {
    pub text: String,
    pub duration_secs: Option<f32>,
}

impl EngineTranscript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration_secs: None,
        }
    }
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribes the audio file at `audio_path`. `language` is an ISO-639-1 hint.
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<EngineTranscript, TranscriptionError>;

    fn source(&self) -> TranscriptionSource;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
