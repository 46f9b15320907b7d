use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use hovor::application::services::{ChatService, EngineHandle, TranscriptionService};
use hovor::infrastructure::audio::TranscriptionEngineFactory;
use hovor::infrastructure::llm::OpenAiChatClient;
use hovor::infrastructure::observability::{TracingConfig, init_tracing};
use hovor::presentation::config::TranscriptionSettings;
use hovor::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(environment, &settings))?;

    let engine = EngineHandle::new();
    spawn_engine_loader(engine.clone(), &settings.transcription);

    let transcription_service = Arc::new(TranscriptionService::new(
        engine,
        settings.transcription.upload_policy()?,
        settings.transcription.language.clone(),
        settings.transcription.staging_dir(),
    ));

    let llm_client = OpenAiChatClient::from_credential(
        settings.llm.api_key(),
        &settings.llm.chat_model,
        Some(settings.llm.base_url.clone()),
    )
    .map(Arc::new);

    match &llm_client {
        Some(client) => tracing::info!(model = %client.model(), "Chat client initialized"),
        None => tracing::warn!("OpenAI API key not found, chat will use fallback responses"),
    }

    let chat_service = Arc::new(ChatService::new(
        llm_client,
        settings.llm.completion_options(),
    ));

    let router = create_router(AppState::new(transcription_service, chat_service));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Loads the engine off the runtime so the listener comes up immediately.
/// A failure leaves the handle empty and `/transcribe` answers 503.
fn spawn_engine_loader(engine: EngineHandle, settings: &TranscriptionSettings) {
    let provider = settings.provider;
    let model = settings.model_name().to_string();
    let api_key = settings.api_key().map(str::to_string);
    let base_url = Some(settings.base_url.clone());

    tokio::task::spawn_blocking(move || {
        tracing::info!(?provider, model = %model, "Initializing transcription engine");
        match TranscriptionEngineFactory::create(provider, &model, api_key, base_url) {
            Ok(created) => {
                engine.install(created);
                tracing::info!(?provider, "Transcription engine ready");
            }
            Err(e) => {
                tracing::error!(error = %e, ?provider, "Transcription engine failed to initialize");
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
