mod chat;
mod error;
mod health;
mod root;
mod transcribe;

pub use chat::{ChatRequestBody, ChatResponse, chat_handler};
pub use error::{ApiError, ErrorBody, ErrorResponse};
pub use health::{HealthResponse, OPENAI_SERVICE, WHISPER_SERVICE, health_handler};
pub use root::{RootResponse, root_handler};
pub use transcribe::{TranscribeResponse, transcribe_handler};
