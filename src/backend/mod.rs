//! Backend module - chat adapters for the cloud providers

pub mod chat_backend;
pub mod prompt;

pub use chat_backend::{AnthropicBackend, ChatBackend, ChatDispatch, ChatMessage, OpenAiBackend};
