use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::domain::{AudioUpload, Transcript};
use crate::presentation::state::AppState;

use super::error::ApiError;

const FILE_FIELD: &str = "file";
const LANGUAGE_FIELD: &str = "language";

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
    pub language: String,
    pub source: String,
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
    pub timestamp: String,
}

impl From<Transcript> for TranscribeResponse {
    fn from(t: Transcript) -> Self {
        Self {
            transcript: t.text,
            language: t.language,
            source: t.source.as_str().to_string(),
            file_size: t.file_size,
            duration: t.duration_secs,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<L>(
    State(state): State<AppState<L>>,
    multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError>
where
    L: LlmClient + 'static,
{
    let upload = read_upload(multipart).await?;
    let transcript = state.transcription_service.transcribe(&upload).await?;
    Ok(Json(transcript.into()))
}

/// Takes the `file` field (or the first field carrying a filename) and an
/// optional `language` text field.
async fn read_upload(mut multipart: Multipart) -> Result<AudioUpload, ApiError> {
    let mut upload: Option<AudioUpload> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);

        if name.as_deref() == Some(LANGUAGE_FIELD) {
            language = Some(field.text().await.map_err(multipart_error)?);
            continue;
        }

        let is_file = name.as_deref() == Some(FILE_FIELD) || file_name.is_some();
        if upload.is_none() && is_file {
            let filename = file_name.unwrap_or_else(|| "unknown".to_string());
            let data = field.bytes().await.map_err(multipart_error)?;
            tracing::debug!(filename = %filename, bytes = data.len(), "File data received");
            upload = Some(AudioUpload::new(filename, data.to_vec()));
        }
    }

    let mut upload = upload.ok_or_else(|| {
        tracing::warn!("Transcribe request with no file");
        ApiError::InvalidRequest("No file uploaded".to_string())
    })?;

    if let Some(language) = language.filter(|l| !l.trim().is_empty()) {
        upload = upload.with_language(language.trim());
    }

    Ok(upload)
}

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!(error = %e, "Upload exceeded body limit");
        ApiError::PayloadTooLarge(format!("File too large: {}", e.body_text()))
    } else {
        tracing::warn!(error = %e, "Failed to read multipart");
        ApiError::InvalidRequest(format!("Failed to read multipart: {}", e.body_text()))
    }
}
