use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::LlmClient;
use crate::application::services::{ChatService, TranscriptionService};

pub struct AppState<L>
where
    L: LlmClient,
{
    pub transcription_service: Arc<TranscriptionService>,
    pub chat_service: Arc<ChatService<L>>,
    pub started_at: DateTime<Utc>,
}

impl<L> AppState<L>
where
    L: LlmClient,
{
    pub fn new(
        transcription_service: Arc<TranscriptionService>,
        chat_service: Arc<ChatService<L>>,
    ) -> Self {
        Self {
            transcription_service,
            chat_service,
            started_at: Utc::now(),
        }
    }
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            transcription_service: Arc::clone(&self.transcription_service),
            chat_service: Arc::clone(&self.chat_service),
            started_at: self.started_at,
        }
    }
}
