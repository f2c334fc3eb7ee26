//! Generation-provider abstraction and implementations
//!
//! This module defines the single trait every content backend implements and
//! the factory that picks an implementation from user settings. The lifecycle
//! layer is generic over [`Provider`] and never branches on backend identity;
//! adding a backend means one new module here and one factory arm.
//!
//! # Examples
//!
//! ```no_run
//! use libquillcast::providers::select_provider;
//! use libquillcast::types::Settings;
//!
//! # async fn example() -> libquillcast::Result<()> {
//! let settings = Settings::default(); // mock provider
//! let provider = select_provider(&settings)?;
//!
//! let content = provider.generate_post("AI Automation", None).await?;
//! let when = provider.analyze_timing("AI Automation").await?;
//! println!("{content} (suggested: {when})");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ConfigError, Result};
use crate::types::{ProviderKind, Settings};

mod chat;
pub mod deepseek;
pub mod gemini;
pub mod openai;
mod timing;

// Mock provider is available for all builds (not just tests) so callers can
// run without API keys
pub mod mock;

pub use deepseek::DeepSeekProvider;
pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use openai::OpenAiProvider;

/// Contract implemented by every content-generation backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Produce a ready-to-post text body for the given topic.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the backend is unreachable, answers
    /// with a non-success status, or the response lacks the expected content
    /// field. An empty body is never returned as a success.
    async fn generate_post(&self, topic: &str, context: Option<&str>) -> Result<String>;

    /// Suggest a publish time, always strictly in the future.
    ///
    /// Each backend applies its own fixed heuristic; the suggestions do not
    /// need to agree across backends.
    async fn analyze_timing(&self, topic: &str) -> Result<DateTime<Utc>>;

    /// Lowercase backend identifier, recorded on generated posts for audit
    fn name(&self) -> &str;
}

/// Build the provider selected by the given settings.
///
/// `mock` (and any unrecognized value, which deserializes to it) always
/// succeeds. A real backend requires a non-empty API key under its own name;
/// a missing key fails here, before any network attempt.
pub fn select_provider(settings: &Settings) -> Result<Box<dyn Provider>> {
    match settings.provider {
        ProviderKind::Mock => Ok(Box::new(MockProvider::new())),
        ProviderKind::OpenAi => {
            let key = require_api_key(settings, ProviderKind::OpenAi)?;
            Ok(Box::new(OpenAiProvider::new(key)))
        }
        ProviderKind::Gemini => {
            let key = require_api_key(settings, ProviderKind::Gemini)?;
            Ok(Box::new(GeminiProvider::new(key)))
        }
        ProviderKind::DeepSeek => {
            let key = require_api_key(settings, ProviderKind::DeepSeek)?;
            Ok(Box::new(DeepSeekProvider::new(key)))
        }
    }
}

fn require_api_key(settings: &Settings, kind: ProviderKind) -> Result<String> {
    settings
        .api_key(kind.as_str())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingApiKey(kind.as_str().to_string()).into())
}
