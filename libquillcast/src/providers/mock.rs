//! Mock generation provider
//!
//! Pure local simulation for running without API keys. A short artificial
//! delay preserves the suspension contract callers observe against the real
//! backends, so UI code exercised against the mock behaves the same way.

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc, Weekday};
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

use crate::error::Result;
use crate::providers::{timing, Provider};

const GENERATE_DELAY: Duration = Duration::from_millis(1500);
const TIMING_DELAY: Duration = Duration::from_millis(800);

/// Mock provider simulating a content backend
pub struct MockProvider {
    generate_delay: Duration,
    timing_delay: Duration,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            generate_delay: GENERATE_DELAY,
            timing_delay: TIMING_DELAY,
        }
    }

    /// Create a mock provider with custom delays (zero in tests)
    pub fn with_delays(generate_delay: Duration, timing_delay: Duration) -> Self {
        Self {
            generate_delay,
            timing_delay,
        }
    }

    fn hook_for(topic: &str, pick: usize) -> String {
        match pick % 4 {
            0 => format!("🚀 Here's what nobody tells you about {topic}..."),
            1 => format!("💡 I just discovered something game-changing about {topic}."),
            2 => format!("🔥 {topic} is evolving faster than most people realize."),
            _ => format!("⚡ The future of {topic} is already here."),
        }
    }

    fn render(topic: &str, context: Option<&str>) -> String {
        let mut rng = rand::thread_rng();
        let hook = Self::hook_for(topic, rng.gen_range(0..4));
        let years = rng.gen_range(1..=5);

        let context_block = match context.filter(|c| !c.trim().is_empty()) {
            Some(c) => format!("\n💭 Context: {c}\n"),
            None => String::new(),
        };

        let hashtag: String = topic.split_whitespace().collect();

        format!(
            "{hook}\n\n\
             After {years} years working with {topic}, I've learned that success comes down to 3 things:\n\n\
             1️⃣ Consistency beats perfection\n\
             2️⃣ Community accelerates growth\n\
             3️⃣ Automation frees creativity\n\
             {context_block}\n\
             What's your experience with {topic}? Drop a comment below! 👇\n\n\
             #{hashtag} #Innovation #Growth #TechTrends"
        )
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate_post(&self, topic: &str, context: Option<&str>) -> Result<String> {
        if !self.generate_delay.is_zero() {
            sleep(self.generate_delay).await;
        }

        Ok(Self::render(topic, context))
    }

    async fn analyze_timing(&self, _topic: &str) -> Result<DateTime<Utc>> {
        if !self.timing_delay.is_zero() {
            sleep(self.timing_delay).await;
        }

        // Engagement peaks early in the week; suggest next Tuesday, 10:00 local
        Ok(timing::next_weekday_at(Local::now(), Weekday::Tue, 10, 0))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
