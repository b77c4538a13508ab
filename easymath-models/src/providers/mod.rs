//! Chat model providers.
//!
//! [`ModelProvider`] is the seam between generation logic and a concrete
//! backend: a hosted OpenAI-compatible API or a local Ollama server. Both
//! make one non-streaming call per request.

mod ollama;
mod openai;
mod types;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::trace;

pub use ollama::{DEFAULT_BASE_URL as OLLAMA_DEFAULT_HOST, OllamaProvider};
pub use openai::{DEFAULT_BASE_URL as OPENAI_DEFAULT_BASE_URL, OpenAiProvider};
pub use types::{ChatRequest, ChatResponse, Message, Role, Usage};

use crate::{Error, Result};

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Short provider name used in logs, e.g. "openai"
    fn name(&self) -> &str;

    /// Perform one chat completion
    ///
    /// A reply without content is not an error here; callers decide what an
    /// empty answer means (see [`ChatResponse::text`]).
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// Send a prepared request and decode a JSON body, mapping non-2xx replies
/// to [`Error::Status`]
async fn send_json<R: DeserializeOwned>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<R> {
    let http = |source| Error::Http { provider, source };

    let response = request.send().await.map_err(http)?;
    let status = response.status();
    let body = response.bytes().await.map_err(http)?;
    trace!(provider, %status, bytes = body.len(), "received response");

    if !status.is_success() {
        return Err(Error::Status {
            provider,
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok(serde_json::from_slice(&body)?)
}
