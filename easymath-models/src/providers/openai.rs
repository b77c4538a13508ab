//! OpenAI-compatible chat completions.
//!
//! Talks to `POST {base_url}/chat/completions` with bearer authentication.
//! Any service exposing the same endpoint shape (vLLM, LiteLLM, Azure
//! proxies) works by overriding the base URL.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ChatRequest, ChatResponse, Message, ModelProvider, Usage, send_json};
use crate::auth::ApiKey;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl<'a> From<&'a ChatRequest> for WireRequest<'a> {
    fn from(request: &'a ChatRequest) -> Self {
        Self {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

impl From<WireResponse> for ChatResponse {
    fn from(response: WireResponse) -> Self {
        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        // Only one completion is ever requested
        let Some(choice) = response.choices.into_iter().next() else {
            return Self {
                content: None,
                truncated: false,
                usage,
            };
        };

        Self {
            content: choice.message.content,
            truncated: choice.finish_reason.as_deref() == Some("length"),
            usage,
        }
    }
}

pub struct OpenAiProvider {
    base_url: String,
    api_key: ApiKey,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: ApiKey) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl ModelProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(&self, request: ChatRequest) -> crate::Result<ChatResponse> {
        let body = WireRequest::from(&request);
        debug!(model = body.model, messages = body.messages.len(), "chat completion");

        let http = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body);
        let response: WireResponse = send_json("openai", http).await?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_defaults_to_public_api() {
        let provider = OpenAiProvider::new(ApiKey::new("sk-test"));
        assert_eq!(provider.base_url(), "https://api.openai.com/v1");

        let provider = OpenAiProvider::with_base_url("http://localhost:8000/v1/", ApiKey::new("x"));
        assert_eq!(provider.base_url(), "http://localhost:8000/v1");
    }

    #[test]
    fn request_body_keeps_roles_and_temperature() {
        let request = ChatRequest::new(
            "gpt-4o",
            vec![Message::system("Be terse"), Message::user("1 + 1?")],
        )
        .temperature(0.0);

        let json = serde_json::to_value(WireRequest::from(&request)).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "1 + 1?");
        assert_eq!(json["temperature"], 0.0);

        let request = ChatRequest::new("gpt-4o", vec![]);
        let json = serde_json::to_value(WireRequest::from(&request)).unwrap();
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn response_takes_first_choice() {
        let json = r#"{
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "<p>The sum of two odd numbers is even.</p>"
                },
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 42, "completion_tokens": 12, "total_tokens": 54}
        }"#;

        let response: ChatResponse = serde_json::from_str::<WireResponse>(json).unwrap().into();
        assert_eq!(
            response.text(),
            Some("<p>The sum of two odd numbers is even.</p>")
        );
        assert!(!response.truncated);
        assert_eq!(response.usage.total(), 54);
    }

    #[test]
    fn null_content_and_missing_choices_have_no_text() {
        let json = r#"{"choices": [{
            "message": {"role": "assistant", "content": null},
            "finish_reason": "length"
        }]}"#;
        let response: ChatResponse = serde_json::from_str::<WireResponse>(json).unwrap().into();
        assert!(response.content.is_none());
        assert!(response.truncated);
        assert_eq!(response.usage, Usage::default());

        let response: ChatResponse = serde_json::from_str::<WireResponse>(r#"{"choices": []}"#)
            .unwrap()
            .into();
        assert!(response.text().is_none());
    }
}
