mod audio_format;
mod audio_upload;
mod chat_reply;
mod chat_turn;
mod message_role;
mod service_status;
mod transcript;

pub use audio_format::AudioFormat;
pub use audio_upload::AudioUpload;
pub use chat_reply::{ChatReply, ReplySource};
pub use chat_turn::ChatTurn;
pub use message_role::MessageRole;
pub use service_status::{HealthReport, HealthStatus, ServiceStatus};
pub use transcript::{Transcript, TranscriptionSource};
