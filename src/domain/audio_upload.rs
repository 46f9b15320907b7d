use std::path::Path;

/// An uploaded audio file awaiting transcription.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub filename: String,
    pub data: Vec<u8>,
    pub language: Option<String>,
}

impl AudioUpload {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Lower-cased extension including the leading dot, or an empty string.
    pub fn extension(&self) -> String {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default()
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}
