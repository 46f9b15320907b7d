use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::application::ports::TranscriptionError;
use crate::domain::{AudioFormat, AudioUpload, Transcript};

use super::engine_handle::EngineHandle;

const STAGING_PREFIX: &str = "hovor-upload-";

/// Limits applied to an upload before it reaches the engine.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub allowed_formats: Vec<AudioFormat>,
    pub max_upload_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_formats: AudioFormat::DEFAULT_ALLOWED.to_vec(),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("unsupported file format: {extension} (allowed: {})", join_formats(.allowed))]
    UnsupportedFormat {
        extension: String,
        allowed: Vec<AudioFormat>,
    },
    #[error("file too large: {size} bytes, maximum is {limit} bytes")]
    PayloadTooLarge { size: u64, limit: u64 },
    #[error("transcription engine is not ready")]
    EngineNotReady,
    #[error("failed to stage upload: {0}")]
    Staging(#[source] std::io::Error),
    #[error(transparent)]
    Engine(#[from] TranscriptionError),
}

fn join_formats(formats: &[AudioFormat]) -> String {
    formats
        .iter()
        .map(|f| f.extension())
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct TranscriptionService {
    engine: EngineHandle,
    policy: UploadPolicy,
    default_language: String,
    staging_dir: PathBuf,
}

impl TranscriptionService {
    pub fn new(
        engine: EngineHandle,
        policy: UploadPolicy,
        default_language: String,
        staging_dir: PathBuf,
    ) -> Self {
        Self {
            engine,
            policy,
            default_language,
            staging_dir,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.policy.max_upload_bytes
    }

    /// Checks extension and size. Touches neither the engine nor the disk.
    pub fn validate(
        &self,
        upload: &AudioUpload,
    ) -> Result<AudioFormat, TranscriptionServiceError> {
        let extension = upload.extension();
        let format = AudioFormat::from_extension(&extension)
            .filter(|f| self.policy.allowed_formats.contains(f))
            .ok_or_else(|| TranscriptionServiceError::UnsupportedFormat {
                extension: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    extension
                },
                allowed: self.policy.allowed_formats.clone(),
            })?;

        let size = upload.size_bytes();
        if size > self.policy.max_upload_bytes {
            return Err(TranscriptionServiceError::PayloadTooLarge {
                size,
                limit: self.policy.max_upload_bytes,
            });
        }

        Ok(format)
    }

    #[tracing::instrument(
        skip(self, upload),
        fields(filename = %upload.filename, bytes = upload.data.len())
    )]
    pub async fn transcribe(
        &self,
        upload: &AudioUpload,
    ) -> Result<Transcript, TranscriptionServiceError> {
        let format = self.validate(upload).inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected upload");
        })?;

        let engine = self.engine.get().ok_or_else(|| {
            tracing::warn!("Transcription requested before engine was ready");
            TranscriptionServiceError::EngineNotReady
        })?;

        let language = upload
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.default_language)
            .to_string();

        let staged = self.stage(upload, format)?;
        tracing::debug!(path = %staged.path().display(), "Upload staged");

        let result = engine.transcribe(staged.path(), Some(&language)).await;
        release(staged);

        match result {
            Ok(output) => {
                let text = output.text.trim().to_string();
                tracing::info!(
                    filename = %upload.filename,
                    bytes = upload.data.len(),
                    chars = text.chars().count(),
                    source = %engine.source(),
                    "Transcription completed"
                );
                Ok(Transcript {
                    text,
                    language,
                    source: engine.source(),
                    file_size: upload.size_bytes(),
                    duration_secs: output.duration_secs,
                })
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    filename = %upload.filename,
                    bytes = upload.data.len(),
                    "Transcription failed"
                );
                Err(e.into())
            }
        }
    }

    fn stage(
        &self,
        upload: &AudioUpload,
        format: AudioFormat,
    ) -> Result<NamedTempFile, TranscriptionServiceError> {
        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(format.extension())
            .tempfile_in(&self.staging_dir)
            .map_err(TranscriptionServiceError::Staging)?;

        staged
            .write_all(&upload.data)
            .map_err(TranscriptionServiceError::Staging)?;
        staged.flush().map_err(TranscriptionServiceError::Staging)?;

        Ok(staged)
    }
}

// Dropping a NamedTempFile also deletes it; closing here surfaces the error.
fn release(staged: NamedTempFile) {
    let path = staged.path().to_path_buf();
    if let Err(e) = staged.close() {
        tracing::warn!(error = %e, path = %path.display(), "Failed to remove staged upload");
    }
}
