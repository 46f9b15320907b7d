use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::application::ports::LlmClient;
use crate::application::services::ChatRequest;
use crate::domain::{ChatReply, ChatTurn};
use crate::presentation::state::AppState;

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ChatRequestBody {
    pub message: String,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
    #[serde(default)]
    pub goals: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    pub tokens_used: u32,
    pub source: String,
    pub timestamp: String,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            response: reply.text,
            model: reply.model,
            tokens_used: reply.tokens_used,
            source: reply.source.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn chat_handler<L>(
    State(state): State<AppState<L>>,
    payload: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError>
where
    L: LlmClient + 'static,
{
    let Json(body) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!(error = %rejection, "Chat request exceeded body limit");
            return ApiError::PayloadTooLarge(rejection.body_text());
        }
        tracing::warn!(error = %rejection, "Malformed chat request");
        ApiError::InvalidRequest(rejection.body_text())
    })?;

    let request = ChatRequest {
        message: body.message,
        history: body.history.unwrap_or_default(),
        goals: body.goals.unwrap_or_default(),
    };

    let reply = state.chat_service.respond(&request).await?;
    Ok(Json(reply.into()))
}
