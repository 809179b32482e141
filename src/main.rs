//! Patient intake service entry point.

use std::sync::Arc;

use patient_intake::adapters::ai::GroqProvider;
use patient_intake::adapters::http::{build_router, IntakeAppState};
use patient_intake::adapters::storage::InMemorySessionStore;
use patient_intake::config::AppConfig;
use patient_intake::logging::init_logging;
use patient_intake::ports::{AIProvider, SessionStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_logging(&config.server.log_level, &config.server.log_format);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let addr = config.server.socket_addr()?;
    let provider = GroqProvider::new(config.ai.provider_config()?)?;
    let info = provider.provider_info();

    let store = Arc::new(InMemorySessionStore::new());
    let state = IntakeAppState::new(store.clone(), Arc::new(provider), config.intake.clone());
    let app = build_router(state, &config.server.cors_origins_list());

    tracing::info!("Patient Intake v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        address = %addr,
        environment = ?config.server.environment,
        provider = %info.name,
        model = %info.model,
        api_key_configured = config.ai.has_api_key(),
        extraction_turn_threshold = config.intake.extraction_turn_threshold,
        "Starting HTTP server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let dropped = store.clear().await?;
    tracing::info!(dropped_sessions = dropped, "Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
