//! Service layer for Quillcast
//!
//! A single facade, `QuillcastService`, coordinates the sub-services the
//! CLI binaries (or any other front end) talk to:
//!
//! - `ComposerService`: drafting, scheduling, and AI generation
//! - `QueueService`: listing and pruning the stored queue
//!
//! The store is injected as a shared `Arc`, so tests substitute an in-memory
//! database without touching the service code.
//!
//! # Example
//!
//! ```no_run
//! use libquillcast::service::{PostDraft, QuillcastService};
//!
//! # async fn example() -> libquillcast::Result<()> {
//! let service = QuillcastService::new().await?;
//!
//! let generation = service.composer().generate("AI Automation", None).await?;
//! let post = service
//!     .composer()
//!     .schedule(PostDraft {
//!         topic: "AI Automation".to_string(),
//!         content: generation.content,
//!         scheduled_at: Some(generation.suggested_time),
//!         provider_used: Some(generation.provider),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Scheduled {}", post.id);
//! # Ok(())
//! # }
//! ```

pub mod composer;
pub mod queue;

pub use composer::{ComposerService, Generation, PostDraft};
pub use queue::QueueService;

use std::sync::Arc;

use crate::config::{resolve_db_path, Config};
use crate::store::Store;
use crate::Result;

/// Facade coordinating the sub-services over one shared store
pub struct QuillcastService {
    store: Arc<Store>,
    composer: ComposerService,
    queue: QueueService,
}

impl QuillcastService {
    /// Create a service with configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the store
    /// cannot be opened or migrated.
    pub async fn new() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(config).await
    }

    /// Create a service from an explicit configuration
    pub async fn from_config(config: Config) -> Result<Self> {
        let db_path = resolve_db_path(Some(&config.database.path))?;
        let db_path = db_path.to_string_lossy();
        let store = Store::open(&db_path).await?;
        Self::with_store(store).await
    }

    /// Create a service over an already-open store (tests use an in-memory
    /// one)
    pub async fn with_store(store: Store) -> Result<Self> {
        store.initialize().await?;
        let store = Arc::new(store);

        let composer = ComposerService::new(Arc::clone(&store));
        let queue = QueueService::new(Arc::clone(&store));

        Ok(Self {
            store,
            composer,
            queue,
        })
    }

    pub fn composer(&self) -> &ComposerService {
        &self.composer
    }

    pub fn queue(&self) -> &QueueService {
        &self.queue
    }

    /// Direct store access, for settings reads/writes at the boundary
    pub fn store(&self) -> &Store {
        &self.store
    }
}
