//! Ollama wire-protocol route handlers

use crate::api::models::{
    now_rfc3339, synthetic_digest, ChatChunk, ChatRequest, EmbeddingsRequest, EmbeddingsResponse,
    GenerateRequest, ModelDetails, ShowDetails, ShowRequest, ShowResponse, TagModel, TagsResponse,
    VersionResponse, EMULATED_VERSION,
};
use crate::api::stream;
use crate::backend::ChatMessage;
use crate::embedding;
use crate::error::AppError;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Liveness probe; clients check for this exact body
pub async fn root() -> &'static str {
    "Ollama is running"
}

/// Emulated daemon version
#[utoipa::path(
    get,
    path = "/api/version",
    tag = "Models",
    responses((status = 200, description = "Emulated daemon version", body = VersionResponse))
)]
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: EMULATED_VERSION.to_string(),
    })
}

/// List every registered model in wire format
///
/// Entries are reported unconditionally; no backend liveness probe is
/// performed before claiming availability.
#[utoipa::path(
    get,
    path = "/api/tags",
    tag = "Models",
    responses((status = 200, description = "All registered models", body = TagsResponse))
)]
pub async fn list_tags(State(state): State<Arc<AppState>>) -> Json<TagsResponse> {
    let now = now_rfc3339();
    let models = state
        .registry
        .iter()
        .map(|(alias, entry)| TagModel {
            name: format!("{}:latest", alias),
            model: format!("{}:latest", alias),
            modified_at: now.clone(),
            size: 0,
            digest: synthetic_digest(alias),
            details: ModelDetails {
                parent_model: String::new(),
                format: "api".to_string(),
                family: entry.provider.to_string(),
                families: vec![entry.provider.to_string()],
                parameter_size: "cloud".to_string(),
                quantization_level: "none".to_string(),
            },
        })
        .collect();

    Json(TagsResponse { models })
}

/// Chat completion over a role-tagged conversation
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant response, NDJSON-streamed or atomic", body = ChatChunk),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "Unknown model"),
        (status = 500, description = "Backend invocation failed"),
    )
)]
pub async fn chat(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => return AppError::MalformedBody(e.to_string()).into_response(),
    };

    run_chat(&state, &request.model, request.messages, request.stream).await
}

/// Single-prompt completion, adapted onto the chat path
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "Chat",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Assistant response, NDJSON-streamed or atomic", body = ChatChunk),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "Unknown model"),
        (status = 500, description = "Backend invocation failed"),
    )
)]
pub async fn generate(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: GenerateRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => return AppError::MalformedBody(e.to_string()).into_response(),
    };

    // Prompt becomes a one- or two-message conversation: an optional
    // leading system message (empty ones are dropped), then the user turn.
    let mut messages = Vec::with_capacity(2);
    if let Some(system) = request.system.as_deref().filter(|s| !s.is_empty()) {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system.to_string(),
        });
    }
    messages.push(ChatMessage {
        role: "user".to_string(),
        content: request.prompt,
    });

    run_chat(&state, &request.model, messages, request.stream).await
}

/// Shared chat core for `/api/chat` and `/api/generate`
async fn run_chat(
    state: &AppState,
    raw_model: &str,
    messages: Vec<ChatMessage>,
    stream: Option<bool>,
) -> Response {
    let resolved = match state.registry.resolve(raw_model) {
        Some(m) => m,
        None => {
            return AppError::UnknownModel {
                requested: raw_model.to_string(),
                available: state.registry.alias_list(),
            }
            .into_response()
        }
    };

    // Streaming is the default; only an explicit false disables it
    let streaming = stream != Some(false);

    info!(
        provider = %resolved.provider,
        model = %resolved.backend_model,
        streaming,
        messages = messages.len(),
        "Dispatching chat request"
    );

    let content = match state
        .chat
        .invoke(resolved.provider, &messages, resolved.backend_model)
        .await
    {
        Ok(text) => text,
        Err(e) => {
            error!(provider = %resolved.provider, error = %e, "Backend invocation failed");
            return e.into_response();
        }
    };

    if streaming {
        stream::ndjson_chat_response(raw_model, &content)
    } else {
        Json(ChatChunk::complete(raw_model, &content)).into_response()
    }
}

/// Synthetic model metadata
#[utoipa::path(
    post,
    path = "/api/show",
    tag = "Models",
    request_body = ShowRequest,
    responses(
        (status = 200, description = "Synthetic model metadata", body = ShowResponse),
        (status = 400, description = "Malformed request body"),
        (status = 404, description = "Unknown model"),
    )
)]
pub async fn show_model(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: ShowRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => return AppError::MalformedBody(e.to_string()).into_response(),
    };

    let raw_model = request.effective_model();
    match state.registry.resolve(raw_model) {
        Some(resolved) => Json(ShowResponse {
            modelfile: format!("# {} via {}", resolved.alias, resolved.provider),
            parameters: String::new(),
            template: String::new(),
            details: ShowDetails {
                parent_model: String::new(),
                format: "api".to_string(),
                family: resolved.provider.to_string(),
            },
        })
        .into_response(),
        None => AppError::UnknownModel {
            requested: raw_model.to_string(),
            available: state.registry.alias_list(),
        }
        .into_response(),
    }
}

/// Deterministic embedding synthesis
///
/// The model field is ignored; every request is served by the local
/// synthesizer regardless of which embedding alias the client named.
#[utoipa::path(
    post,
    path = "/api/embeddings",
    tag = "Embeddings",
    request_body = EmbeddingsRequest,
    responses(
        (status = 200, description = "768-dimension vector", body = EmbeddingsResponse),
        (status = 400, description = "Malformed request body"),
    )
)]
pub async fn embeddings(body: Bytes) -> Response {
    let request: EmbeddingsRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => return AppError::MalformedBody(e.to_string()).into_response(),
    };

    Json(EmbeddingsResponse {
        embedding: embedding::synthesize(request.text()),
    })
    .into_response()
}

/// Fallback for unknown routes, echoing the method and path
pub async fn not_found(method: Method, uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Not found: {} {}", method, uri.path()) })),
    )
        .into_response()
}
