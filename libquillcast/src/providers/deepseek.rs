//! DeepSeek generation provider
//!
//! DeepSeek exposes an OpenAI-compatible chat completions endpoint, so this
//! provider rides the shared client and only supplies its own endpoint,
//! prompts, and timing heuristic.

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};

use crate::error::Result;
use crate::providers::chat::ChatCompletionsClient;
use crate::providers::{timing, Provider};

const BASE_URL: &str = "https://api.deepseek.com/v1/chat/completions";
const MODEL: &str = "deepseek-chat";

const SYSTEM_PROMPT: &str = "You are a viral social media content strategist. \
Create engaging professional posts with hooks, value, and CTAs.";

pub struct DeepSeekProvider {
    chat: ChatCompletionsClient,
}

impl DeepSeekProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            chat: ChatCompletionsClient::new(api_key, MODEL, BASE_URL, "deepseek"),
        }
    }
}

#[async_trait]
impl Provider for DeepSeekProvider {
    async fn generate_post(&self, topic: &str, context: Option<&str>) -> Result<String> {
        let mut user = format!("Write a social media post about: {topic}");
        if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
            user.push_str(&format!("\n\nContext: {context}"));
        }

        self.chat.complete(SYSTEM_PROMPT, user).await
    }

    async fn analyze_timing(&self, _topic: &str) -> Result<DateTime<Utc>> {
        Ok(timing::tomorrow_at(Local::now(), 10, 30))
    }

    fn name(&self) -> &str {
        "deepseek"
    }
}
