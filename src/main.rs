//! Main entry point for the Ollama Cloud Gateway

use ollama_cloud_gateway::{
    api, backend::ChatDispatch, config::Settings, registry::ModelRegistry, AppState,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    if settings.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!("Starting Ollama Cloud Gateway");
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    // Build the immutable registry and the backend dispatch
    let registry = ModelRegistry::builtin();
    let chat = ChatDispatch::new(&settings.backends)?;

    info!(models = registry.len(), "Model registry initialized");
    for (alias, entry) in registry.iter() {
        info!(
            provider = %entry.provider,
            backend_model = %entry.backend_model,
            "  {}", alias
        );
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    // Create application state and build the router
    let app_state = Arc::new(AppState {
        settings,
        registry,
        chat,
    });
    let app = api::routes::create_router(app_state);

    info!("Server listening on {}", addr);
    info!("Point the note app's Local AI server URL at http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
