use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use hovor::application::ports::{CompletionOptions, LlmClient, LlmClientError};
use hovor::domain::ChatTurn;
use hovor::infrastructure::llm::OpenAiChatClient;

use crate::helpers::start_mock_server;

const OPTIONS: CompletionOptions = CompletionOptions {
    max_tokens: 500,
    temperature: 0.7,
};

/// Echoes the request shape back through the completion content.
async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer sk-test") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "bad key"}})),
        );
    }

    let messages = body["messages"].as_array().cloned().unwrap_or_default();
    let roles: Vec<&str> = messages
        .iter()
        .filter_map(|m| m["role"].as_str())
        .collect();
    let content = format!(
        " {}|{}|{} ",
        body["model"].as_str().unwrap_or_default(),
        body["max_tokens"],
        roles.join(",")
    );

    (
        StatusCode::OK,
        Json(json!({
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 30, "completion_tokens": 12, "total_tokens": 42}
        })),
    )
}

fn turns() -> Vec<ChatTurn> {
    vec![ChatTurn::system("Buď stručný."), ChatTurn::user("Ahoj")]
}

#[tokio::test]
async fn given_successful_completion_when_completing_then_returns_text_tokens_and_configured_model()
 {
    let app = Router::new().route("/chat/completions", post(completions));
    let (base_url, shutdown) = start_mock_server(app).await;
    let client = OpenAiChatClient::new(
        "sk-test".to_string(),
        "gpt-4o-mini".to_string(),
        Some(base_url),
    );

    let completion = client.complete(&turns(), &OPTIONS).await.unwrap();

    assert_eq!(completion.text, " gpt-4o-mini|500|system,user ");
    assert_eq!(completion.tokens_used, 42);
    assert_eq!(completion.model, "gpt-4o-mini");

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_response_without_usage_when_completing_then_tokens_default_to_zero() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({"choices": [{"message": {"content": "Ahoj!"}}]})) }),
    );
    let (base_url, shutdown) = start_mock_server(app).await;
    let client = OpenAiChatClient::new("sk-test".to_string(), "m".to_string(), Some(base_url));

    let completion = client.complete(&turns(), &OPTIONS).await.unwrap();

    assert_eq!(completion.text, "Ahoj!");
    assert_eq!(completion.tokens_used, 0);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_when_completing_then_returns_rate_limited() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let (base_url, shutdown) = start_mock_server(app).await;
    let client = OpenAiChatClient::new("sk-test".to_string(), "m".to_string(), Some(base_url));

    let err = client.complete(&turns(), &OPTIONS).await.unwrap_err();

    assert!(matches!(err, LlmClientError::RateLimited));

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_completing_then_returns_api_request_failed() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let (base_url, shutdown) = start_mock_server(app).await;
    let client = OpenAiChatClient::new("sk-test".to_string(), "m".to_string(), Some(base_url));

    let err = client.complete(&turns(), &OPTIONS).await.unwrap_err();

    match err {
        LlmClientError::ApiRequestFailed(message) => {
            assert!(message.contains("500"));
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_empty_choices_when_completing_then_returns_invalid_response() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let (base_url, shutdown) = start_mock_server(app).await;
    let client = OpenAiChatClient::new("sk-test".to_string(), "m".to_string(), Some(base_url));

    let err = client.complete(&turns(), &OPTIONS).await.unwrap_err();

    assert!(matches!(err, LlmClientError::InvalidResponse(_)));

    shutdown.send(()).ok();
}

#[test]
fn given_blank_credential_when_building_client_then_returns_none() {
    assert!(OpenAiChatClient::from_credential(Some("   "), "m", None).is_none());
    assert!(OpenAiChatClient::from_credential(None, "m", None).is_none());

    let client = OpenAiChatClient::from_credential(Some(" sk-test "), "gpt-4o-mini", None).unwrap();
    assert_eq!(client.model(), "gpt-4o-mini");
}
