use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionSource {
    Local,
    OpenAiApi,
}

impl TranscriptionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptionSource::Local => "local",
            TranscriptionSource::OpenAiApi => "openai-api",
        }
    }
}

impl fmt::Display for TranscriptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub language: String,
    pub source: TranscriptionSource,
    pub file_size: u64,
    pub duration_secs: Option<f32>,
}
