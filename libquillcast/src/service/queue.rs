//! Queue service: read and prune the stored post collection

use std::sync::Arc;

use tracing::info;

use crate::store::Store;
use crate::types::{Post, PostStatus};
use crate::Result;

pub struct QueueService {
    store: Arc<Store>,
}

impl QueueService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// List posts in stored order, optionally filtered by status
    pub async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>> {
        let posts = self.store.read_posts().await?;

        Ok(match status {
            Some(status) => posts.into_iter().filter(|p| p.status == status).collect(),
            None => posts,
        })
    }

    /// Look up a single post by id
    pub async fn get(&self, id: &str) -> Result<Option<Post>> {
        let posts = self.store.read_posts().await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    /// Delete a post. Explicit delete is the only way a post leaves the
    /// collection; deleting an unknown id is a no-op.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete_post(id).await?;
        info!(post_id = id, "Deleted post");
        Ok(())
    }
}
