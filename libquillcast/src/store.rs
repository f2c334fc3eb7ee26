//! Durable key-value storage for settings and the post collection
//!
//! Two logical records live in a single SQLite table: `settings` (one JSON
//! object) and `posts` (one JSON array). Every mutation is read-modify-write
//! inside a transaction, so upsert/delete see a consistent collection even
//! when callers race within the process.

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;

use crate::error::{Result, StorageError};
use crate::types::{Post, Settings};

const SETTINGS_KEY: &str = "settings";
const POSTS_KEY: &str = "posts";

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) the store at the given path
    pub async fn open(db_path: &str) -> Result<Self> {
        // Expand path and create parent directories
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        // Forward slashes keep the SQLite URL valid on Windows as well;
        // mode=rwc creates the file when it does not exist yet
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        // One connection: record mutations are read-modify-write and must be
        // serialized within the process
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&db_url)
            .await
            .map_err(StorageError::Database)?;

        Self::from_pool(pool).await
    }

    /// Open an in-memory store (used by tests)
    pub async fn open_in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(StorageError::Database)?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        Ok(Self { pool })
    }

    /// Ensure the posts record exists. Idempotent; never touches existing data.
    pub async fn initialize(&self) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO records (key, value) VALUES (?, ?)")
            .bind(POSTS_KEY)
            .bind("[]")
            .execute(&self.pool)
            .await
            .map_err(StorageError::Database)?;

        Ok(())
    }

    /// Read the last-saved settings, or the defaults when none exist yet
    pub async fn read_settings(&self) -> Result<Settings> {
        match self.read_record(SETTINGS_KEY).await? {
            Some(raw) => {
                let settings = serde_json::from_str(&raw).map_err(StorageError::Corrupt)?;
                Ok(settings)
            }
            None => Ok(Settings::default()),
        }
    }

    /// Replace the stored settings wholesale
    pub async fn write_settings(&self, settings: &Settings) -> Result<()> {
        let raw = serde_json::to_string(settings).map_err(StorageError::Corrupt)?;
        self.write_record(SETTINGS_KEY, &raw).await
    }

    /// Read the post collection in stored order; empty when none exist
    pub async fn read_posts(&self) -> Result<Vec<Post>> {
        match self.read_record(POSTS_KEY).await? {
            Some(raw) => {
                let posts = serde_json::from_str(&raw).map_err(StorageError::Corrupt)?;
                Ok(posts)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Insert or replace a post by id.
    ///
    /// An existing post is replaced in place, keeping its position in the
    /// collection; a new post is appended. Save, edit, and create all funnel
    /// through here.
    pub async fn upsert_post(&self, post: &Post) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(StorageError::Database)?;

        let mut posts = Self::posts_from_tx(&mut tx).await?;
        match posts.iter_mut().find(|p| p.id == post.id) {
            Some(existing) => *existing = post.clone(),
            None => posts.push(post.clone()),
        }

        Self::write_posts_to_tx(&mut tx, &posts).await?;
        tx.commit().await.map_err(StorageError::Database)?;
        Ok(())
    }

    /// Remove the post with the given id; a no-op when absent
    pub async fn delete_post(&self, id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(StorageError::Database)?;

        let mut posts = Self::posts_from_tx(&mut tx).await?;
        posts.retain(|p| p.id != id);

        Self::write_posts_to_tx(&mut tx, &posts).await?;
        tx.commit().await.map_err(StorageError::Database)?;
        Ok(())
    }

    async fn posts_from_tx(tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>) -> Result<Vec<Post>> {
        let row = sqlx::query("SELECT value FROM records WHERE key = ?")
            .bind(POSTS_KEY)
            .fetch_optional(&mut **tx)
            .await
            .map_err(StorageError::Database)?;

        match row {
            Some(row) => {
                let raw: String = row.get("value");
                let posts = serde_json::from_str(&raw).map_err(StorageError::Corrupt)?;
                Ok(posts)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn write_posts_to_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        posts: &[Post],
    ) -> Result<()> {
        let raw = serde_json::to_string(posts).map_err(StorageError::Corrupt)?;
        sqlx::query("INSERT OR REPLACE INTO records (key, value) VALUES (?, ?)")
            .bind(POSTS_KEY)
            .bind(raw)
            .execute(&mut **tx)
            .await
            .map_err(StorageError::Database)?;
        Ok(())
    }

    async fn read_record(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM records WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Database)?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn write_record(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO records (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Database)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PostStatus, ProviderKind};
    use crate::QuillcastError;
    use chrono::Utc;

    fn sample_post(content: &str) -> Post {
        Post {
            id: uuid::Uuid::new_v4().to_string(),
            topic: "Test topic".to_string(),
            content: content.to_string(),
            media: None,
            scheduled_at: None,
            status: PostStatus::Draft,
            provider_used: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_open_with_invalid_path() {
        let result = Store::open("/tmp/quillcast\0invalid.db").await;
        assert!(result.is_err(), "Expected error for invalid path");

        match result {
            Err(QuillcastError::Storage(_)) => {}
            _ => panic!("Expected StorageError for invalid path"),
        }
    }

    #[tokio::test]
    async fn test_open_creates_parent_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let db_path = dir.path().join("nested").join("queue.db");

        let store = Store::open(db_path.to_str().unwrap()).await.unwrap();
        store.initialize().await.unwrap();

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_read_settings_missing_returns_default() {
        let store = Store::open_in_memory().await.unwrap();

        let settings = store.read_settings().await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let store = Store::open_in_memory().await.unwrap();

        let mut settings = Settings::default();
        settings.provider = ProviderKind::Gemini;
        settings
            .api_keys
            .insert("gemini".to_string(), "key-123".to_string());
        settings.access_token = Some("opaque".to_string());

        store.write_settings(&settings).await.unwrap();
        let back = store.read_settings().await.unwrap();
        assert_eq!(back, settings);
    }

    #[tokio::test]
    async fn test_write_settings_is_full_replace() {
        let store = Store::open_in_memory().await.unwrap();

        let mut first = Settings::default();
        first
            .api_keys
            .insert("openai".to_string(), "old".to_string());
        store.write_settings(&first).await.unwrap();

        let second = Settings {
            provider: ProviderKind::Mock,
            api_keys: Default::default(),
            access_token: None,
        };
        store.write_settings(&second).await.unwrap();

        let back = store.read_settings().await.unwrap();
        assert!(back.api_keys.is_empty());
    }

    #[tokio::test]
    async fn test_read_posts_missing_returns_empty() {
        let store = Store::open_in_memory().await.unwrap();

        let posts = store.read_posts().await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let store = Store::open_in_memory().await.unwrap();

        store.initialize().await.unwrap();
        let post = sample_post("kept");
        store.upsert_post(&post).await.unwrap();

        // A second initialize must not wipe existing posts
        store.initialize().await.unwrap();
        let posts = store.read_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, post.id);
    }

    #[tokio::test]
    async fn test_upsert_then_read_round_trip() {
        let store = Store::open_in_memory().await.unwrap();
        store.initialize().await.unwrap();

        let post = sample_post("Round trip");
        store.upsert_post(&post).await.unwrap();

        let posts = store.read_posts().await.unwrap();
        let matching: Vec<_> = posts.iter().filter(|p| p.id == post.id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(*matching[0], post);
    }

    #[tokio::test]
    async fn test_upsert_identical_post_is_idempotent() {
        let store = Store::open_in_memory().await.unwrap();
        store.initialize().await.unwrap();

        let post = sample_post("Same twice");
        store.upsert_post(&post).await.unwrap();
        store.upsert_post(&post).await.unwrap();

        let posts = store.read_posts().await.unwrap();
        assert_eq!(posts.iter().filter(|p| p.id == post.id).count(), 1);
    }

    #[tokio::test]
    async fn test_upsert_replaces_in_place() {
        let store = Store::open_in_memory().await.unwrap();
        store.initialize().await.unwrap();

        let first = sample_post("first");
        let second = sample_post("second");
        let third = sample_post("third");
        store.upsert_post(&first).await.unwrap();
        store.upsert_post(&second).await.unwrap();
        store.upsert_post(&third).await.unwrap();

        // Edit the middle post; it must keep its slot
        let mut edited = second.clone();
        edited.content = "second, edited".to_string();
        store.upsert_post(&edited).await.unwrap();

        let posts = store.read_posts().await.unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[1].id, second.id);
        assert_eq!(posts[1].content, "second, edited");
    }

    #[tokio::test]
    async fn test_upsert_preserves_insertion_order() {
        let store = Store::open_in_memory().await.unwrap();
        store.initialize().await.unwrap();

        let a = sample_post("a");
        let b = sample_post("b");
        store.upsert_post(&a).await.unwrap();
        store.upsert_post(&b).await.unwrap();

        let posts = store.read_posts().await.unwrap();
        assert_eq!(posts[0].id, a.id);
        assert_eq!(posts[1].id, b.id);
    }

    #[tokio::test]
    async fn test_delete_post() {
        let store = Store::open_in_memory().await.unwrap();
        store.initialize().await.unwrap();

        let post = sample_post("doomed");
        store.upsert_post(&post).await.unwrap();
        store.delete_post(&post.id).await.unwrap();

        let posts = store.read_posts().await.unwrap();
        assert!(posts.iter().all(|p| p.id != post.id));
    }

    #[tokio::test]
    async fn test_delete_missing_post_is_noop() {
        let store = Store::open_in_memory().await.unwrap();
        store.initialize().await.unwrap();

        let post = sample_post("survivor");
        store.upsert_post(&post).await.unwrap();

        store.delete_post("no-such-id").await.unwrap();

        let posts = store.read_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_posts_record_surfaces_storage_error() {
        let store = Store::open_in_memory().await.unwrap();

        sqlx::query("INSERT OR REPLACE INTO records (key, value) VALUES ('posts', '{broken')")
            .execute(&store.pool)
            .await
            .unwrap();

        let result = store.read_posts().await;
        assert!(matches!(
            result,
            Err(QuillcastError::Storage(StorageError::Corrupt(_)))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_settings_record_surfaces_storage_error() {
        let store = Store::open_in_memory().await.unwrap();

        sqlx::query("INSERT OR REPLACE INTO records (key, value) VALUES ('settings', 'null no')")
            .execute(&store.pool)
            .await
            .unwrap();

        let result = store.read_settings().await;
        assert!(matches!(
            result,
            Err(QuillcastError::Storage(StorageError::Corrupt(_)))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_upserts_all_land() {
        let store = Store::open_in_memory().await.unwrap();
        store.initialize().await.unwrap();

        let mut handles = vec![];
        for i in 0..5 {
            let store = store.clone();
            let post = sample_post(&format!("concurrent {}", i));
            handles.push(tokio::spawn(async move {
                let id = post.id.clone();
                store.upsert_post(&post).await.map(|_| id)
            }));
        }

        let mut ids = vec![];
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }

        let posts = store.read_posts().await.unwrap();
        for id in ids {
            assert!(posts.iter().any(|p| p.id == id));
        }
    }

    #[tokio::test]
    async fn test_posts_survive_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        let db_path = dir.path().join("queue.db");
        let path = db_path.to_str().unwrap();

        let post = sample_post("persisted");
        {
            let store = Store::open(path).await.unwrap();
            store.initialize().await.unwrap();
            store.upsert_post(&post).await.unwrap();
        }

        let store = Store::open(path).await.unwrap();
        let posts = store.read_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0], post);
    }
}
