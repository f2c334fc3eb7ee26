//! Gemini generation provider
//!
//! Gemini takes the API key as a URL query parameter rather than a bearer
//! header, and folds the persona and topic into a single content part.

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{GenerationError, Result};
use crate::providers::{timing, Provider};

const BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

pub struct GeminiProvider {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    fn prompt(topic: &str, context: Option<&str>) -> String {
        let mut text = format!(
            "You are a viral social media content strategist. \
             Write an engaging post about: {topic}"
        );
        if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
            text.push_str(&format!("\n\nContext: {context}"));
        }
        text.push_str("\n\nMake it professional, valuable, and viral-worthy with emojis and hashtags.");
        text
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate_post(&self, topic: &str, context: Option<&str>) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Self::prompt(topic, context),
                }],
            }],
        };

        debug!(provider = "gemini", "Sending generateContent request");

        let response = self
            .client
            .post(BASE_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = "gemini", error = %e, "HTTP request failed");
                GenerationError::Network(format!("gemini request failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(provider = "gemini", status = %status, "Backend returned an error");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(provider = "gemini", error = %e, "Failed to parse response");
            GenerationError::MissingContent(format!("gemini response was not valid JSON: {e}"))
        })?;

        extract_text(parsed)
    }

    async fn analyze_timing(&self, _topic: &str) -> Result<DateTime<Utc>> {
        Ok(timing::tomorrow_at(Local::now(), 14, 0))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// First candidate, first part. Empty text counts as missing content.
fn extract_text(response: GenerateContentResponse) -> Result<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::MissingContent(
            "gemini response contained no candidate text".to_string(),
        )
        .into());
    }

    Ok(text)
}
