use std::sync::Arc;

use crate::application::ports::{Completion, CompletionOptions, LlmClient};
use crate::domain::{ChatReply, ChatTurn, ReplySource};
use crate::infrastructure::observability::message_preview;

use super::fallback_responder::{FALLBACK_MODEL, fallback_reply};

const SYSTEM_INSTRUCTION: &str = "Jsi AI asistent pro českou konverzaci. Odpovídej v češtině přirozeně a užitečně. Buď přátelský a nápomocný.";

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatTurn>,
    pub goals: Vec<String>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// Result of trying the remote chat model.
#[derive(Debug)]
pub enum ChatOutcome {
    External(Completion),
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    NotConfigured,
    UpstreamFailed(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ChatServiceError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub struct ChatService<L>
where
    L: LlmClient,
{
    llm_client: Option<Arc<L>>,
    options: CompletionOptions,
}

impl<L> ChatService<L>
where
    L: LlmClient,
{
    /// `llm_client` is `None` when no credential was configured at startup.
    pub fn new(llm_client: Option<Arc<L>>, options: CompletionOptions) -> Self {
        Self {
            llm_client,
            options,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.llm_client.is_some()
    }

    #[tracing::instrument(
        skip(self, request),
        fields(history = request.history.len(), goals = request.goals.len())
    )]
    pub async fn respond(&self, request: &ChatRequest) -> Result<ChatReply, ChatServiceError> {
        if request.message.trim().is_empty() {
            tracing::warn!("Chat request with empty message");
            return Err(ChatServiceError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }

        tracing::debug!(message = %message_preview(&request.message), "Processing chat message");

        let reply = match self.attempt(request).await {
            ChatOutcome::External(completion) => {
                tracing::info!(
                    chars = completion.text.chars().count(),
                    tokens_used = completion.tokens_used,
                    "Chat completion successful"
                );
                ChatReply {
                    text: completion.text.trim().to_string(),
                    model: completion.model,
                    tokens_used: completion.tokens_used,
                    source: ReplySource::OpenAi,
                }
            }
            ChatOutcome::Fallback(reason) => {
                let source = match &reason {
                    FallbackReason::NotConfigured => ReplySource::Fallback,
                    FallbackReason::UpstreamFailed(_) => ReplySource::Error,
                };
                tracing::info!(reason = ?reason, "Answering with fallback responder");
                ChatReply {
                    text: fallback_reply(&request.message),
                    model: FALLBACK_MODEL.to_string(),
                    tokens_used: 0,
                    source,
                }
            }
        };

        Ok(reply)
    }

    /// Tries the remote model once; never returns an error.
    pub async fn attempt(&self, request: &ChatRequest) -> ChatOutcome {
        let Some(client) = &self.llm_client else {
            return ChatOutcome::Fallback(FallbackReason::NotConfigured);
        };

        let turns = build_turns(request);

        match client.complete(&turns, &self.options).await {
            Ok(completion) => ChatOutcome::External(completion),
            Err(e) => {
                tracing::error!(error = %e, "Chat completion failed");
                ChatOutcome::Fallback(FallbackReason::UpstreamFailed(e.to_string()))
            }
        }
    }
}

pub fn system_instruction(goals: &[String]) -> String {
    let goals: Vec<&str> = goals
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect();

    if goals.is_empty() {
        SYSTEM_INSTRUCTION.to_string()
    } else {
        format!(
            "{}\n\nUživatelské cíle: {}",
            SYSTEM_INSTRUCTION,
            goals.join(", ")
        )
    }
}

/// System instruction, then history in order, then the new user message.
pub fn build_turns(request: &ChatRequest) -> Vec<ChatTurn> {
    let mut turns = Vec::with_capacity(request.history.len() + 2);
    turns.push(ChatTurn::system(system_instruction(&request.goals)));
    turns.extend(request.history.iter().cloned());
    turns.push(ChatTurn::user(request.message.clone()));
    turns
}
