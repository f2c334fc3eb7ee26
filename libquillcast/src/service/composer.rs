//! Composer service: draft, schedule, and generate operations

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::providers::select_provider;
use crate::scheduling;
use crate::store::Store;
use crate::types::{MediaFile, Post, PostStatus};
use crate::{QuillcastError, Result};

/// Owns the create/edit/save path of the post state machine.
///
/// Posts enter the collection as `draft` or `scheduled`; the `posted` and
/// `failed` states belong to the external publish hand-off and have no
/// transition here.
pub struct ComposerService {
    store: Arc<Store>,
}

/// Fields for building or updating a post
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    /// Name an existing post's id to edit it in place
    pub id: Option<String>,
    pub topic: String,
    pub content: String,
    pub media: Option<MediaFile>,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Backend that produced the content, when it was generated
    pub provider_used: Option<String>,
}

/// Output of a generation run.
///
/// The caller merges this into its in-progress post (and keeps the previous
/// content around itself if it wants undo); nothing is persisted here.
#[derive(Debug, Clone)]
pub struct Generation {
    pub content: String,
    pub suggested_time: DateTime<Utc>,
    pub provider: String,
}

impl ComposerService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Save the fields as a draft. Drafts may be topic-only; no content
    /// validation applies until scheduling.
    ///
    /// # Errors
    ///
    /// Returns an error if the post cannot be persisted.
    pub async fn save_draft(&self, draft: PostDraft) -> Result<Post> {
        let post = self.build_post(draft, PostStatus::Draft).await?;
        self.store.upsert_post(&post).await?;

        info!(post_id = %post.id, "Saved draft");
        Ok(post)
    }

    /// Commit the fields to the schedule.
    ///
    /// The publish time falls back to 24 hours from now when unset.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for empty content, before the collection is
    /// touched; storage errors otherwise.
    pub async fn schedule(&self, mut draft: PostDraft) -> Result<Post> {
        if draft.content.trim().is_empty() {
            return Err(QuillcastError::Validation(
                "Cannot schedule a post without content".to_string(),
            ));
        }

        if draft.scheduled_at.is_none() {
            draft.scheduled_at = Some(scheduling::default_schedule());
        }

        let post = self.build_post(draft, PostStatus::Scheduled).await?;
        self.store.upsert_post(&post).await?;

        info!(post_id = %post.id, "Scheduled post");
        Ok(post)
    }

    /// Generate content and a suggested publish time for the topic.
    ///
    /// Resolves a provider from the persisted settings, then runs the two
    /// provider calls together; they have no ordering dependency, and the
    /// first failure cancels the other.
    pub async fn generate(&self, topic: &str, context: Option<&str>) -> Result<Generation> {
        if topic.trim().is_empty() {
            return Err(QuillcastError::Validation(
                "Topic cannot be empty".to_string(),
            ));
        }

        let settings = self.store.read_settings().await?;
        let provider = select_provider(&settings)?;

        info!(provider = provider.name(), topic, "Generating content");

        let (content, suggested_time) = tokio::try_join!(
            provider.generate_post(topic, context),
            provider.analyze_timing(topic)
        )?;

        Ok(Generation {
            content,
            suggested_time,
            provider: provider.name().to_string(),
        })
    }

    /// Materialize a `Post` from the draft fields. Naming an existing id
    /// keeps that post's identity and creation time; everything else is
    /// replaced wholesale.
    async fn build_post(&self, draft: PostDraft, status: PostStatus) -> Result<Post> {
        let existing = match &draft.id {
            Some(id) => self
                .store
                .read_posts()
                .await?
                .into_iter()
                .find(|p| p.id == *id),
            None => None,
        };

        let (id, created_at) = match (&draft.id, existing) {
            (_, Some(previous)) => (previous.id, previous.created_at),
            (Some(id), None) => (id.clone(), Utc::now()),
            (None, None) => (Uuid::new_v4().to_string(), Utc::now()),
        };

        Ok(Post {
            id,
            topic: draft.topic,
            content: draft.content,
            media: draft.media,
            scheduled_at: draft.scheduled_at,
            status,
            provider_used: draft.provider_used,
            created_at,
        })
    }
}
