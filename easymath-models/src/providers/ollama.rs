//! Local models through Ollama's `/api/chat` endpoint.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatRequest, ChatResponse, Message, ModelProvider, Usage, send_json};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<WireOptions>,
}

#[derive(Debug, Serialize)]
struct WireOptions {
    temperature: f32,
}

impl<'a> From<&'a ChatRequest> for WireRequest<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        Self {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            options: request
                .temperature
                .map(|temperature| WireOptions { temperature }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    message: WireMessage,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: String,
}

impl From<WireResponse> for ChatResponse {
    fn from(response: WireResponse) -> Self {
        Self {
            content: Some(response.message.content).filter(|c| !c.is_empty()),
            truncated: response.done_reason.as_deref() == Some("length"),
            usage: Usage {
                prompt_tokens: response.prompt_eval_count,
                completion_tokens: response.eval_count,
            },
        }
    }
}

/// Ollama server, `http://localhost:11434` unless told otherwise
pub struct OllamaProvider {
    base_url: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ModelProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat(&self, request: ChatRequest) -> crate::Result<ChatResponse> {
        let body = WireRequest::from(&request);
        debug!(model = body.model, host = %self.base_url, "ollama chat");

        let http = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body);
        let response: WireResponse = send_json("ollama", http).await?;
        Ok(response.into())
    }
}
