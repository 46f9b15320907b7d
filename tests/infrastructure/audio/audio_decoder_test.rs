use hovor::application::ports::TranscriptionError;
use hovor::infrastructure::audio::audio_decoder::{TARGET_SAMPLE_RATE, decode_audio_to_pcm};

use crate::helpers::build_wav;

#[test]
fn given_16khz_mono_wav_when_decoding_then_keeps_sample_count() {
    let samples: Vec<i16> = (0..16_000).map(|i| ((i % 100) * 100) as i16).collect();
    let wav = build_wav(TARGET_SAMPLE_RATE, &samples);

    let pcm = decode_audio_to_pcm(&wav, Some("wav")).unwrap();

    assert_eq!(pcm.len(), samples.len());
    assert!(pcm.iter().all(|s| (-1.0..=1.0).contains(s)));
}

#[test]
fn given_48khz_wav_when_decoding_then_resamples_to_16khz() {
    let samples = vec![0i16; 48_000];
    let wav = build_wav(48_000, &samples);

    let pcm = decode_audio_to_pcm(&wav, Some(".wav")).unwrap();

    assert!(
        (15_500..=16_000).contains(&pcm.len()),
        "got {} samples",
        pcm.len()
    );
}

#[test]
fn given_garbage_bytes_when_decoding_then_returns_decoding_failed() {
    let err = decode_audio_to_pcm(b"definitely not audio", None).unwrap_err();

    assert!(matches!(err, TranscriptionError::DecodingFailed(_)));
}
