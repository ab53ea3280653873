//! Ollama Cloud Gateway
//!
//! A local HTTP gateway exposing the Ollama wire protocol while dispatching
//! requests to cloud LLM backends (Anthropic- and OpenAI-style chat
//! capabilities) plus a deterministic local embedding synthesizer. Clients
//! such as a note-taking app's AI integration see a single local inference
//! daemon; the gateway makes the heterogeneous providers indistinguishable
//! from it at the wire level.

pub mod api;
pub mod backend;
pub mod config;
pub mod embedding;
pub mod error;
pub mod registry;

pub use error::{AppError, Result};

use backend::ChatDispatch;
use registry::ModelRegistry;

/// Application state shared across all handlers
///
/// Everything here is read-only after startup; handlers never mutate it.
pub struct AppState {
    pub settings: config::Settings,
    pub registry: ModelRegistry,
    pub chat: ChatDispatch,
}
