//! Shared client for OpenAI-compatible chat completion endpoints
//!
//! OpenAI and DeepSeek speak the same chat completions format; this client
//! holds the common request/response plumbing so each provider only supplies
//! its endpoint, model, and prompts.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{GenerationError, Result};

#[derive(Debug, Clone)]
pub(crate) struct ChatCompletionsClient {
    client: Client,
    api_key: String,
    model: &'static str,
    base_url: &'static str,
    provider_name: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub(crate) fn new(
        api_key: String,
        model: &'static str,
        base_url: &'static str,
        provider_name: &'static str,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model,
            base_url,
            provider_name,
        }
    }

    /// Send one chat completion request and extract the generated text
    pub(crate) async fn complete(&self, system: &str, user: String) -> Result<String> {
        let request = ChatRequest {
            model: self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        debug!(
            provider = self.provider_name,
            model = self.model,
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = self.provider_name, error = %e, "HTTP request failed");
                GenerationError::Network(format!("{} request failed: {}", self.provider_name, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(
                provider = self.provider_name,
                status = %status,
                "Backend returned an error"
            );
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(provider = self.provider_name, error = %e, "Failed to parse response");
            GenerationError::MissingContent(format!(
                "{} response was not valid JSON: {}",
                self.provider_name, e
            ))
        })?;

        extract_content(parsed, self.provider_name)
    }
}

/// Pull the generated text out of the response envelope.
///
/// A present-but-empty message is treated the same as a missing one: content
/// absence is always an error, never an empty success.
fn extract_content(response: ChatResponse, provider: &str) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(GenerationError::MissingContent(format!(
            "{provider} response contained no message content"
        ))
        .into());
    }

    Ok(content)
}
