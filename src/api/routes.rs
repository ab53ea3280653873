//! HTTP route definitions

use crate::api::handlers;
use crate::api::models::{
    ChatChunk, ChatRequest, EmbeddingsRequest, EmbeddingsResponse, GenerateRequest, ModelDetails,
    ShowDetails, ShowRequest, ShowResponse, TagModel, TagsResponse, VersionResponse,
};
use crate::backend::ChatMessage;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Ollama Cloud Gateway API",
        version = "0.2.0",
        description = "Ollama-compatible local gateway dispatching chat, generate and embedding requests to cloud LLM backends.",
        license(name = "MIT"),
    ),
    servers(
        (url = "http://localhost:11435", description = "Local gateway")
    ),
    paths(
        handlers::version,
        handlers::list_tags,
        handlers::chat,
        handlers::generate,
        handlers::show_model,
        handlers::embeddings,
    ),
    components(schemas(
        VersionResponse,
        TagsResponse,
        TagModel,
        ModelDetails,
        ChatRequest,
        GenerateRequest,
        ChatChunk,
        ChatMessage,
        ShowRequest,
        ShowResponse,
        ShowDetails,
        EmbeddingsRequest,
        EmbeddingsResponse,
    )),
    tags(
        (name = "Models", description = "Model listing and metadata endpoints"),
        (name = "Chat", description = "Chat and prompt completion endpoints"),
        (name = "Embeddings", description = "Embedding synthesis endpoints"),
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: Arc<crate::AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/version", get(handlers::version))
        .route("/api/tags", get(handlers::list_tags))
        .route("/api/chat", post(handlers::chat))
        .route("/api/generate", post(handlers::generate))
        .route("/api/show", post(handlers::show_model))
        .route("/api/embeddings", post(handlers::embeddings))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Anything else echoes method and path in the protocol's 404 shape
        .fallback(handlers::not_found)
        // Add shared state
        .with_state(state)
        // The note app's webview calls cross-origin
        .layer(CorsLayer::permissive())
        // Add tracing layer
        .layer(TraceLayer::new_for_http())
}
