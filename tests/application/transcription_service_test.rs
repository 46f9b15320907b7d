use hovor::application::services::{TranscriptionServiceError, UploadPolicy};
use hovor::domain::{AudioFormat, AudioUpload, TranscriptionSource};
use tempfile::TempDir;

use crate::helpers::{MockTranscriptionEngine, staged_file_count, transcription_service};

#[tokio::test]
async fn given_upload_without_language_when_transcribing_then_default_language_is_used() {
    let staging = TempDir::new().unwrap();
    let engine = MockTranscriptionEngine::returning(" Dobrý den ");
    let service = transcription_service(Some(engine.clone()), UploadPolicy::default(), &staging);

    let transcript = service
        .transcribe(&AudioUpload::new("zprava.MP3", b"abc".to_vec()))
        .await
        .unwrap();

    assert_eq!(transcript.text, "Dobrý den");
    assert_eq!(transcript.language, "cs");
    assert_eq!(transcript.source, TranscriptionSource::OpenAiApi);
    assert_eq!(transcript.file_size, 3);

    let (path, existed, language) = &engine.seen()[0];
    assert!(existed);
    assert!(path.starts_with(staging.path()));
    assert!(path.to_string_lossy().ends_with(".mp3"));
    assert_eq!(language.as_deref(), Some("cs"));
    assert!(!path.exists());
}

#[tokio::test]
async fn given_blank_language_hint_when_transcribing_then_falls_back_to_default() {
    let staging = TempDir::new().unwrap();
    let engine = MockTranscriptionEngine::returning("text");
    let service = transcription_service(Some(engine.clone()), UploadPolicy::default(), &staging);

    let upload = AudioUpload::new("voice.wav", b"abc".to_vec()).with_language("  ");
    let transcript = service.transcribe(&upload).await.unwrap();

    assert_eq!(transcript.language, "cs");
}

#[tokio::test]
async fn given_file_without_extension_when_validating_then_reports_none() {
    let staging = TempDir::new().unwrap();
    let service = transcription_service(None, UploadPolicy::default(), &staging);

    let err = service
        .validate(&AudioUpload::new("recording", b"abc".to_vec()))
        .unwrap_err();

    assert!(err.to_string().contains("(none)"));
}

#[tokio::test]
async fn given_ogg_not_allowed_by_default_when_policy_enables_it_then_upload_is_accepted() {
    let staging = TempDir::new().unwrap();
    let upload = AudioUpload::new("voice.ogg", b"abc".to_vec());

    let default_service = transcription_service(None, UploadPolicy::default(), &staging);
    assert!(matches!(
        default_service.validate(&upload),
        Err(TranscriptionServiceError::UnsupportedFormat { .. })
    ));

    let mut policy = UploadPolicy::default();
    policy.allowed_formats.push(AudioFormat::Ogg);
    let service = transcription_service(None, policy, &staging);
    assert_eq!(service.validate(&upload).unwrap(), AudioFormat::Ogg);
}

#[tokio::test]
async fn given_upload_exactly_at_limit_when_validating_then_it_is_accepted() {
    let staging = TempDir::new().unwrap();
    let policy = UploadPolicy {
        allowed_formats: AudioFormat::DEFAULT_ALLOWED.to_vec(),
        max_upload_bytes: 16,
    };
    let service = transcription_service(None, policy, &staging);

    assert!(
        service
            .validate(&AudioUpload::new("a.wav", vec![0; 16]))
            .is_ok()
    );
    assert!(matches!(
        service.validate(&AudioUpload::new("a.wav", vec![0; 17])),
        Err(TranscriptionServiceError::PayloadTooLarge {
            size: 17,
            limit: 16
        })
    ));
}

#[tokio::test]
async fn given_unsupported_and_oversized_upload_when_validating_then_format_error_wins() {
    let staging = TempDir::new().unwrap();
    let policy = UploadPolicy {
        allowed_formats: AudioFormat::DEFAULT_ALLOWED.to_vec(),
        max_upload_bytes: 4,
    };
    let service = transcription_service(None, policy, &staging);

    let err = service
        .validate(&AudioUpload::new("doc.pdf", vec![0; 10]))
        .unwrap_err();

    assert!(matches!(
        err,
        TranscriptionServiceError::UnsupportedFormat { .. }
    ));
}

#[tokio::test]
async fn given_no_engine_when_transcribing_valid_upload_then_nothing_is_staged() {
    let staging = TempDir::new().unwrap();
    let service = transcription_service(None, UploadPolicy::default(), &staging);

    let err = service
        .transcribe(&AudioUpload::new("voice.m4a", b"abc".to_vec()))
        .await
        .unwrap_err();

    assert!(matches!(err, TranscriptionServiceError::EngineNotReady));
    assert!(!service.is_ready());
    assert_eq!(staged_file_count(&staging), 0);
}

#[tokio::test]
async fn given_engine_error_when_transcribing_then_error_propagates_and_file_is_removed() {
    let staging = TempDir::new().unwrap();
    let engine = MockTranscriptionEngine::failing();
    let service = transcription_service(Some(engine.clone()), UploadPolicy::default(), &staging);

    let err = service
        .transcribe(&AudioUpload::new("voice.webm", b"abc".to_vec()))
        .await
        .unwrap_err();

    assert!(matches!(err, TranscriptionServiceError::Engine(_)));
    assert_eq!(staged_file_count(&staging), 0);
}
