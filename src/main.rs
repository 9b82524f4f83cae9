use axum::{routing::get, Router};
use docgate::{
    backend::CollaborationBackend, document, AppState, DocumentGateway, GatewayConfig,
    InMemoryBackend, LiveblocksBackend, UuidIdGenerator,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting document access gateway");

    let config = GatewayConfig::from_env()?;
    info!(?config, "Configuration loaded");

    // Hosted service when a secret key is configured, in-memory otherwise
    let backend: Arc<dyn CollaborationBackend> = match &config.secret_key {
        Some(secret_key) => Arc::new(LiveblocksBackend::new(
            &config.api_base,
            secret_key.clone(),
            config.request_timeout,
        )?),
        None => {
            warn!("LIVEBLOCKS_SECRET_KEY not set, using in-memory backend");
            Arc::new(InMemoryBackend::new())
        }
    };

    let gateway = DocumentGateway::new(backend, Arc::new(UuidIdGenerator::new()));
    let app_state = AppState::new(Arc::new(gateway));

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(document::router())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
