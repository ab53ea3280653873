//! Ollama wire-protocol request and response models

use crate::backend::ChatMessage;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Version string reported by `/api/version`
///
/// Pinned to a daemon release recent enough for the clients that gate on it.
pub const EMULATED_VERSION: &str = "0.6.2";

/// Chat request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Defaults to streaming unless explicitly set to false
    #[serde(default)]
    pub stream: Option<bool>,
    /// Sampling options; accepted for wire compatibility, unused downstream
    #[serde(default)]
    #[schema(value_type = Object)]
    pub options: serde_json::Value,
}

/// Single-prompt generate request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateRequest {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub stream: Option<bool>,
    /// Sampling options; accepted for wire compatibility, unused downstream
    #[serde(default)]
    #[schema(value_type = Object)]
    pub options: serde_json::Value,
}

/// Show request; clients send either `name` or `model`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ShowRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl ShowRequest {
    /// The effective model name: `name` first, then `model`, empty last
    pub fn effective_model(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.model.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("")
    }
}

/// Embeddings request; clients send either `prompt` or `input`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmbeddingsRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub input: Option<String>,
}

impl EmbeddingsRequest {
    /// The effective input text: `prompt` first, then `input`, empty last
    pub fn text(&self) -> &str {
        self.prompt
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.input.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("")
    }
}

/// Version response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    pub version: String,
}

/// Model details as reported by `/api/tags`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelDetails {
    pub parent_model: String,
    pub format: String,
    pub family: String,
    pub families: Vec<String>,
    pub parameter_size: String,
    pub quantization_level: String,
}

/// One entry of the `/api/tags` model listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagModel {
    pub name: String,
    pub model: String,
    pub modified_at: String,
    pub size: u64,
    pub digest: String,
    pub details: ModelDetails,
}

/// `/api/tags` response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TagsResponse {
    pub models: Vec<TagModel>,
}

/// Model details as reported by `/api/show`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShowDetails {
    pub parent_model: String,
    pub format: String,
    pub family: String,
}

/// `/api/show` response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShowResponse {
    pub modelfile: String,
    pub parameters: String,
    pub template: String,
    pub details: ShowDetails,
}

/// `/api/embeddings` response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmbeddingsResponse {
    pub embedding: Vec<f32>,
}

/// One line of a chat/generate response, streamed or atomic
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatChunk {
    pub model: String,
    pub created_at: String,
    pub message: ChatMessage,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,
}

impl ChatChunk {
    /// A non-terminal streamed fragment
    pub fn fragment(model: &str, content: String) -> Self {
        Self {
            model: model.to_string(),
            created_at: now_rfc3339(),
            message: ChatMessage {
                role: "assistant".to_string(),
                content,
            },
            done: false,
            done_reason: None,
        }
    }

    /// The terminal streamed chunk: empty content, done, stop reason
    pub fn terminal(model: &str) -> Self {
        Self {
            model: model.to_string(),
            created_at: now_rfc3339(),
            message: ChatMessage {
                role: "assistant".to_string(),
                content: String::new(),
            },
            done: true,
            done_reason: Some("stop".to_string()),
        }
    }

    /// The single atomic (non-streaming) response object
    pub fn complete(model: &str, content: &str) -> Self {
        Self {
            model: model.to_string(),
            created_at: now_rfc3339(),
            message: ChatMessage {
                role: "assistant".to_string(),
                content: content.to_string(),
            },
            done: true,
            done_reason: Some("stop".to_string()),
        }
    }
}

/// Current time in the RFC 3339 shape clients expect
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Synthetic digest for a registry alias: hex of the alias bytes,
/// right-padded with zeros to 64 characters
pub fn synthetic_digest(alias: &str) -> String {
    let mut hex: String = alias.bytes().map(|b| format!("{:02x}", b)).collect();
    while hex.len() < 64 {
        hex.push('0');
    }
    format!("sha256:{}", hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_request_prefers_name_over_model() {
        let req = ShowRequest {
            name: Some("claude-sonnet".to_string()),
            model: Some("gpt-5".to_string()),
        };
        assert_eq!(req.effective_model(), "claude-sonnet");
    }

    #[test]
    fn show_request_empty_name_falls_through() {
        let req = ShowRequest {
            name: Some(String::new()),
            model: Some("gpt-5".to_string()),
        };
        assert_eq!(req.effective_model(), "gpt-5");

        let req = ShowRequest {
            name: None,
            model: None,
        };
        assert_eq!(req.effective_model(), "");
    }

    #[test]
    fn embeddings_request_prompt_then_input() {
        let req = EmbeddingsRequest {
            prompt: None,
            input: Some("text".to_string()),
        };
        assert_eq!(req.text(), "text");

        let req = EmbeddingsRequest {
            prompt: Some(String::new()),
            input: Some("fallback".to_string()),
        };
        assert_eq!(req.text(), "fallback");
    }

    #[test]
    fn synthetic_digest_is_padded_hex() {
        let digest = synthetic_digest("o3");
        assert!(digest.starts_with("sha256:6f33"));
        assert_eq!(digest.len(), "sha256:".len() + 64);
        assert!(digest.ends_with('0'));
    }

    #[test]
    fn synthetic_digest_is_stable() {
        assert_eq!(synthetic_digest("gpt-5"), synthetic_digest("gpt-5"));
        assert_ne!(synthetic_digest("gpt-5"), synthetic_digest("gpt-5.1"));
    }

    #[test]
    fn terminal_chunk_shape() {
        let chunk = ChatChunk::terminal("claude-sonnet:latest");
        assert!(chunk.done);
        assert_eq!(chunk.done_reason.as_deref(), Some("stop"));
        assert!(chunk.message.content.is_empty());
        assert_eq!(chunk.message.role, "assistant");
    }

    #[test]
    fn fragment_serializes_without_done_reason() {
        let chunk = ChatChunk::fragment("m", "abc".to_string());
        let json = serde_json::to_string(&chunk).unwrap();
        assert!(!json.contains("done_reason"));
        assert!(json.contains("\"done\":false"));
    }
}
