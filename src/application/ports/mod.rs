mod llm_client;
mod transcription_engine;

pub use llm_client::{Completion, CompletionOptions, LlmClient, LlmClientError};
pub use transcription_engine::{EngineTranscript, TranscriptionEngine, TranscriptionError};
