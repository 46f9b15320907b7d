use async_trait::async_trait;

use crate::domain::ChatTurn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: usize,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model: String,
    pub tokens_used: u32,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        options: &CompletionOptions,
    ) -> Result<Completion, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
