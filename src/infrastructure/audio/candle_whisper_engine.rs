use std::path::Path;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{EngineTranscript, TranscriptionEngine, TranscriptionError};
use crate::domain::TranscriptionSource;

use super::audio_decoder::{TARGET_SAMPLE_RATE, decode_audio_to_pcm};

const MEL_FILTERS_REPO: &str = "FL33TW00D-HF/whisper-base";
const MAX_DECODE_TOKENS: usize = 224;

/// Whisper running in-process on the CPU via candle.
pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
}

struct SpecialTokens {
    sot: u32,
    transcribe: u32,
    no_timestamps: u32,
    eot: u32,
}

impl CandleWhisperEngine {
    /// Fetches (or reuses cached) weights for `model_id` from the Hugging Face hub.
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(model = model_id, device = ?device, "Loading local Whisper model");

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));
        let fetch = |file: &str| {
            repo.get(file)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("{}: {}", file, e)))
        };

        let config_path = fetch("config.json")?;
        let tokenizer_path = fetch("tokenizer.json")?;
        let weights_path = fetch("model.safetensors")?;

        let mel_bytes_path = api
            .repo(Repo::new(MEL_FILTERS_REPO.to_string(), RepoType::Model))
            .get("melfilters.bytes")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

        let config: Config = serde_json::from_str(&std::fs::read_to_string(&config_path)?)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_filters = read_mel_filters(&std::fs::read(&mel_bytes_path)?, &config)?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!(model = model_id, "Local Whisper model loaded");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
        })
    }

    fn special_tokens(&self) -> Result<SpecialTokens, TranscriptionError> {
        Ok(SpecialTokens {
            sot: token_id(&self.tokenizer, m::SOT_TOKEN)?,
            transcribe: token_id(&self.tokenizer, m::TRANSCRIBE_TOKEN)?,
            no_timestamps: token_id(&self.tokenizer, m::NO_TIMESTAMPS_TOKEN)?,
            eot: token_id(&self.tokenizer, m::EOT_TOKEN)?,
        })
    }

    /// Prompt prefix: start-of-transcript, optional language, task, no timestamps.
    fn prompt_tokens(&self, language: Option<&str>) -> Result<Vec<u32>, TranscriptionError> {
        let special = self.special_tokens()?;
        let mut tokens = vec![special.sot];

        if let Some(language) = language {
            match self.tokenizer.token_to_id(&format!("<|{}|>", language)) {
                Some(id) => tokens.push(id),
                None => tracing::debug!(language, "Model has no token for language hint"),
            }
        }

        tokens.push(special.transcribe);
        tokens.push(special.no_timestamps);
        Ok(tokens)
    }

    fn mel_segment(&self, samples: &[f32]) -> Result<Tensor, TranscriptionError> {
        let mut padded = samples.to_vec();
        padded.resize(m::N_SAMPLES, 0.0);

        let mel = m::audio::pcm_to_mel(&self.config, &padded, &self.mel_filters);
        let n_mel = self.config.num_mel_bins;
        let n_frames = mel.len() / n_mel;

        // pcm_to_mel pads past the 30 s window; the encoder takes exactly N_FRAMES.
        Tensor::from_vec(mel, (1, n_mel, n_frames), &self.device)
            .and_then(|t| t.narrow(2, 0, n_frames.min(m::N_FRAMES)))
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e)))
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<&str>,
    ) -> Result<EngineTranscript, TranscriptionError> {
        let data = tokio::fs::read(audio_path).await?;
        let extension = audio_path.extension().and_then(|e| e.to_str());
        let pcm = decode_audio_to_pcm(&data, extension)?;
        let duration_secs = pcm.len() as f32 / TARGET_SAMPLE_RATE as f32;

        let prompt = self.prompt_tokens(language)?;
        let eot = self.special_tokens()?.eot;

        let mels = pcm
            .chunks(m::N_SAMPLES)
            .map(|chunk| self.mel_segment(chunk))
            .collect::<Result<Vec<_>, _>>()?;

        let mut model = self.model.lock().await;
        let mut segments: Vec<String> = Vec::with_capacity(mels.len());

        for (i, mel) in mels.iter().enumerate() {
            tracing::debug!(segment = i, "Decoding audio segment");
            let text =
                decode_segment(&mut model, &self.tokenizer, &self.device, mel, &prompt, eot)?;
            if !text.is_empty() {
                segments.push(text);
            }
        }

        Ok(EngineTranscript {
            text: segments.join(" "),
            duration_secs: Some(duration_secs),
        })
    }

    fn source(&self) -> TranscriptionSource {
        TranscriptionSource::Local
    }
}

fn decode_segment(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
    prompt: &[u32],
    eot: u32,
) -> Result<String, TranscriptionError> {
    let failed = |stage: &str, e: candle_core::Error| {
        TranscriptionError::TranscriptionFailed(format!("{}: {}", stage, e))
    };

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(|e| failed("encoder", e))?;

    let mut tokens = prompt.to_vec();
    let mut generated: Vec<u32> = Vec::new();

    for step in 0..MAX_DECODE_TOKENS {
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| failed("tokens", e))?;

        let hidden = model
            .decoder
            .forward(&token_tensor, &audio_features, step == 0)
            .map_err(|e| failed("decoder", e))?;

        let logits = hidden
            .squeeze(0)
            .and_then(|h| model.decoder.final_linear(&h))
            .map_err(|e| failed("linear", e))?;

        let next_token = logits
            .dim(0)
            .and_then(|len| logits.get(len - 1))
            .and_then(|last| last.argmax(0))
            .and_then(|t| t.to_scalar::<u32>())
            .map_err(|e| failed("argmax", e))?;

        if next_token == eot {
            break;
        }

        tokens.push(next_token);
        generated.push(next_token);
    }

    model.reset_kv_cache();

    let text = tokenizer
        .decode(&generated, true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("detokenize: {}", e)))?;

    Ok(text.trim().to_string())
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
