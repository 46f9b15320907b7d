pub mod audio_decoder;
mod candle_whisper_engine;
mod openai_whisper_engine;
mod transcription_engine_factory;

pub use candle_whisper_engine::CandleWhisperEngine;
pub use openai_whisper_engine::{DEFAULT_WHISPER_API_MODEL, OpenAiWhisperEngine};
pub use transcription_engine_factory::{
    TranscriptionEngineFactory, TranscriptionProvider, local_model_id,
};
