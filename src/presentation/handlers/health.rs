use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::application::services::aggregate_status;
use crate::domain::{HealthStatus, ServiceStatus};
use crate::presentation::state::AppState;

pub const WHISPER_SERVICE: &str = "whisper";
pub const OPENAI_SERVICE: &str = "openai";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub services: BTreeMap<String, ServiceStatus>,
}

pub fn service_readiness<L>(state: &AppState<L>) -> BTreeMap<String, bool>
where
    L: LlmClient,
{
    BTreeMap::from([
        (
            WHISPER_SERVICE.to_string(),
            state.transcription_service.is_ready(),
        ),
        (OPENAI_SERVICE.to_string(), state.chat_service.is_ready()),
    ])
}

/// Always 200: a degraded service still answers chat through the fallback.
pub async fn health_handler<L>(State(state): State<AppState<L>>) -> Json<HealthResponse>
where
    L: LlmClient + 'static,
{
    let now = Utc::now();
    let report = aggregate_status(&service_readiness(&state), now);
    if report.status == HealthStatus::Degraded {
        tracing::debug!(status = %report.status, "Health check reports degraded services");
    }
    let uptime_seconds = now
        .signed_duration_since(state.started_at)
        .num_seconds()
        .max(0) as u64;

    Json(HealthResponse {
        status: report.status,
        timestamp: report.checked_at.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        services: report.services,
    })
}
