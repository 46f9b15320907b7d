use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;

use super::health::service_readiness;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
    pub version: String,
    pub services: BTreeMap<String, bool>,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

pub async fn root_handler<L>(State(state): State<AppState<L>>) -> Json<RootResponse>
where
    L: LlmClient + 'static,
{
    Json(RootResponse {
        message: "Hovor: Czech speech-to-text and chat API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services: service_readiness(&state),
        endpoints: BTreeMap::from([
            ("chat", "POST /chat"),
            ("health", "GET /health"),
            ("transcribe", "POST /transcribe"),
        ]),
    })
}
