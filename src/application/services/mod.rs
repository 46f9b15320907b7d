mod chat_service;
mod engine_handle;
mod fallback_responder;
mod status_aggregator;
mod transcription_service;

pub use chat_service::{
    ChatOutcome, ChatRequest, ChatService, ChatServiceError, FallbackReason, build_turns,
    system_instruction,
};
pub use engine_handle::EngineHandle;
pub use fallback_responder::{FALLBACK_MODEL, fallback_reply};
pub use status_aggregator::aggregate_status;
pub use transcription_service::{TranscriptionService, TranscriptionServiceError, UploadPolicy};
