//! Chat backend adapters for the cloud model providers
//!
//! Each adapter converts a generic ordered conversation into the prompt
//! shape its provider expects, performs one single-shot invocation, and
//! returns the complete text result. There is no retry, no fallback and
//! no timeout on the call: a hung backend hangs only its own request.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::backend::prompt;
use crate::config::{BackendEndpoint, BackendsSettings};
use crate::error::{AppError, Result};
use crate::registry::ProviderKind;

/// One role-tagged message of a conversation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Completion budget for single-shot backend calls
const MAX_COMPLETION_TOKENS: u32 = 4096;

/// A capability that turns a conversation into one complete text response
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Invoke the backend with the full message list, returning the final
    /// text (empty string if the backend yielded no result)
    async fn invoke(&self, messages: &[ChatMessage], backend_model: &str) -> Result<String>;
}

/// Message wrapper both providers accept for the rendered prompt
#[derive(Debug, Serialize)]
struct PromptMessage {
    role: &'static str,
    content: String,
}

// ── Anthropic ──────────────────────────────────────────────────────────

/// Anthropic messages-style backend
pub struct AnthropicBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<PromptMessage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<AnthropicContentBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

impl AnthropicBackend {
    pub fn new(config: &BackendEndpoint) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key(),
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        if let Some(key) = &self.api_key {
            if let Ok(value) = HeaderValue::from_str(key) {
                headers.insert("x-api-key", value);
            }
        }
        headers
    }
}

#[async_trait]
impl ChatBackend for AnthropicBackend {
    async fn invoke(&self, messages: &[ChatMessage], backend_model: &str) -> Result<String> {
        let rendered = prompt::render_anthropic(messages);
        let url = format!("{}/v1/messages", self.base_url);

        debug!(model = %backend_model, prompt_len = rendered.len(), "Sending messages request");

        let request = AnthropicRequest {
            model: backend_model,
            max_tokens: MAX_COMPLETION_TOKENS,
            messages: vec![PromptMessage {
                role: "user",
                content: rendered,
            }],
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BackendError(format!(
                "Backend returned {}: {}",
                status, body
            )));
        }

        let result = response
            .json::<AnthropicResponse>()
            .await
            .map_err(|e| AppError::BackendError(format!("Failed to parse response: {}", e)))?;

        Ok(result
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .concat())
    }
}

// ── OpenAI ─────────────────────────────────────────────────────────────

/// OpenAI chat-completions-style backend
///
/// Every invocation starts a fresh conversational context; nothing is
/// reused across requests.
pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<PromptMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiBackend {
    pub fn new(config: &BackendEndpoint) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key(),
        })
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.api_key {
            if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", key)) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn invoke(&self, messages: &[ChatMessage], backend_model: &str) -> Result<String> {
        let rendered = prompt::render_openai(messages);
        let url = format!("{}/v1/chat/completions", self.base_url);

        debug!(model = %backend_model, prompt_len = rendered.len(), "Sending chat completion request");

        let request = OpenAiRequest {
            model: backend_model,
            messages: vec![PromptMessage {
                role: "user",
                content: rendered,
            }],
        };

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::BackendError(format!(
                "Backend returned {}: {}",
                status, body
            )));
        }

        let result = response
            .json::<OpenAiResponse>()
            .await
            .map_err(|e| AppError::BackendError(format!("Failed to parse response: {}", e)))?;

        Ok(result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

// ── Dispatch ───────────────────────────────────────────────────────────

/// Provider-kind dispatch over the configured chat backends
///
/// Selection is a pure function of [`ProviderKind`]; there is no fallback
/// and no cross-adapter retry.
pub struct ChatDispatch {
    anthropic: AnthropicBackend,
    openai: OpenAiBackend,
}

impl ChatDispatch {
    pub fn new(settings: &BackendsSettings) -> Result<Self> {
        Ok(Self {
            anthropic: AnthropicBackend::new(&settings.anthropic)?,
            openai: OpenAiBackend::new(&settings.openai)?,
        })
    }

    /// Route a conversation to the adapter for the given provider kind
    ///
    /// The embedding pseudo-provider has no chat capability and yields an
    /// empty result.
    pub async fn invoke(
        &self,
        provider: ProviderKind,
        messages: &[ChatMessage],
        backend_model: &str,
    ) -> Result<String> {
        match provider {
            ProviderKind::Anthropic => self.anthropic.invoke(messages, backend_model).await,
            ProviderKind::OpenAi => self.openai.invoke(messages, backend_model).await,
            ProviderKind::Embedding => Ok(String::new()),
        }
    }
}
