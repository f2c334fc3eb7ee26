//! OpenAI generation provider

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};

use crate::error::Result;
use crate::providers::chat::ChatCompletionsClient;
use crate::providers::{timing, Provider};

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
const MODEL: &str = "gpt-4-turbo-preview";

const SYSTEM_PROMPT: &str = "\
You are a viral social media content strategist. Create engaging, professional posts that:
- Start with a strong hook
- Provide actionable value
- Use clean formatting with emojis
- Include relevant hashtags
- Encourage engagement";

pub struct OpenAiProvider {
    chat: ChatCompletionsClient,
}

impl OpenAiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            chat: ChatCompletionsClient::new(api_key, MODEL, BASE_URL, "openai"),
        }
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn generate_post(&self, topic: &str, context: Option<&str>) -> Result<String> {
        let mut user = format!("Write a social media post about: {topic}");
        if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
            user.push_str(&format!("\n\nAdditional context: {context}"));
        }

        self.chat.complete(SYSTEM_PROMPT, user).await
    }

    async fn analyze_timing(&self, _topic: &str) -> Result<DateTime<Utc>> {
        Ok(timing::tomorrow_at(Local::now(), 10, 0))
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[tokio::test]
    async fn test_timing_is_tomorrow_morning() {
        let provider = OpenAiProvider::new("sk-test".to_string());
        let suggested = provider.analyze_timing("anything").await.unwrap();

        assert!(suggested > Utc::now());
        let local = suggested.with_timezone(&Local);
        assert_eq!(local.hour(), 10);
    }

    #[test]
    fn test_name() {
        let provider = OpenAiProvider::new("sk-test".to_string());
        assert_eq!(provider.name(), "openai");
    }
}
