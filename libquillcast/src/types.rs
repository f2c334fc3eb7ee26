//! Core types for Quillcast

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A post moving through the local queue.
///
/// Created as `Draft` or `Scheduled`; the `Posted` and `Failed` states are
/// reserved for the external publish hand-off and are never set here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub topic: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: PostStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Posted,
    Failed,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Posted => "posted",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "posted" => Ok(Self::Posted),
            "failed" => Ok(Self::Failed),
            _ => Err(format!(
                "Invalid status: '{}'. Valid options: draft, scheduled, posted, failed",
                s
            )),
        }
    }
}

// ============================================================================
// Media Types
// ============================================================================

/// Broad kind of an attached file, derived once from the source file's
/// declared type and never recomputed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
}

impl MediaKind {
    /// Derive the kind from a MIME string (e.g. "image/png")
    pub fn from_mime_str(s: &str) -> Option<Self> {
        let mime = s.to_lowercase();
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else if mime == "application/pdf" || mime.starts_with("text/") {
            Some(Self::Document)
        } else {
            None
        }
    }

    /// Derive the kind from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => Some(Self::Image),
            "mp4" | "mov" | "webm" | "avi" => Some(Self::Video),
            "pdf" | "doc" | "docx" | "txt" | "md" => Some(Self::Document),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptor for a single file attached to a post.
///
/// The file itself stays on disk; the descriptor records where it lives and a
/// content hash for integrity checks at hand-off time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFile {
    pub id: String,
    pub kind: MediaKind,
    pub name: String,
    /// Local path reference to the source file
    pub location: String,
    /// File size in bytes
    pub size: u64,
    /// SHA-256 hash of the file content (hex encoded)
    pub sha256: String,
}

impl MediaFile {
    pub fn new(kind: MediaKind, name: String, location: String, size: u64, sha256: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            name,
            location,
            size,
            sha256,
        }
    }

    /// Build a descriptor from a file on disk, deriving the kind from the
    /// file extension and hashing the content.
    pub fn from_path(path: &std::path::Path) -> crate::Result<Self> {
        use sha2::{Digest, Sha256};

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let kind = MediaKind::from_extension(ext).ok_or_else(|| {
            crate::QuillcastError::Validation(format!("Unsupported media type: '{}'", ext))
        })?;

        let bytes = std::fs::read(path).map_err(crate::error::StorageError::Io)?;
        let digest = Sha256::digest(&bytes);
        let sha256 = digest.iter().map(|b| format!("{:02x}", b)).collect();

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();

        Ok(Self::new(
            kind,
            name,
            path.to_string_lossy().to_string(),
            bytes.len() as u64,
            sha256,
        ))
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Which generation backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    DeepSeek,
    #[default]
    #[serde(other)]
    Mock,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::DeepSeek => "deepseek",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "deepseek" => Ok(Self::DeepSeek),
            _ => Err(format!(
                "Unknown provider: '{}'. Valid options: mock, openai, gemini, deepseek",
                s
            )),
        }
    }
}

/// User settings persisted under the `settings` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderKind,
    /// Provider name -> secret; a missing key means "not configured"
    #[serde(default)]
    pub api_keys: HashMap<String, String>,
    /// Opaque token for the publishing platform; stored, never validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Mock,
            api_keys: HashMap::new(),
            access_token: None,
        }
    }
}

impl Settings {
    /// Look up a non-empty API key for the named provider
    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys
            .get(provider)
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: Uuid::new_v4().to_string(),
            topic: "Rust".to_string(),
            content: "Hello from the queue".to_string(),
            media: None,
            scheduled_at: None,
            status: PostStatus::Draft,
            provider_used: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_post_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&PostStatus::Draft).unwrap(),
            r#""draft""#
        );
        assert_eq!(
            serde_json::to_string(&PostStatus::Scheduled).unwrap(),
            r#""scheduled""#
        );
        assert_eq!(
            serde_json::to_string(&PostStatus::Posted).unwrap(),
            r#""posted""#
        );
        assert_eq!(
            serde_json::to_string(&PostStatus::Failed).unwrap(),
            r#""failed""#
        );
    }

    #[test]
    fn test_post_status_from_str() {
        assert_eq!("draft".parse::<PostStatus>().unwrap(), PostStatus::Draft);
        assert_eq!(
            "SCHEDULED".parse::<PostStatus>().unwrap(),
            PostStatus::Scheduled
        );
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_post_round_trips_every_field() {
        let post = Post {
            id: "post-1".to_string(),
            topic: "AI Automation".to_string(),
            content: "Generated body".to_string(),
            media: Some(MediaFile::new(
                MediaKind::Image,
                "chart.png".to_string(),
                "/tmp/chart.png".to_string(),
                2048,
                "abc123".to_string(),
            )),
            scheduled_at: Some("2026-08-11T10:00:00Z".parse().unwrap()),
            status: PostStatus::Scheduled,
            provider_used: Some("mock".to_string()),
            created_at: "2026-08-06T09:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn test_scheduled_at_serializes_as_iso8601() {
        let mut post = sample_post();
        post.scheduled_at = Some("2026-08-11T10:00:00Z".parse().unwrap());

        let json = serde_json::to_value(&post).unwrap();
        let raw = json["scheduled_at"].as_str().unwrap();
        assert!(raw.starts_with("2026-08-11T10:00:00"));
    }

    #[test]
    fn test_unset_optionals_are_omitted() {
        let post = sample_post();
        let json = serde_json::to_value(&post).unwrap();

        assert!(json.get("media").is_none());
        assert!(json.get("scheduled_at").is_none());
        assert!(json.get("provider_used").is_none());
    }

    #[test]
    fn test_media_kind_from_extension() {
        assert_eq!(MediaKind::from_extension("jpg"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_extension("PNG"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_extension("mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("pdf"), Some(MediaKind::Document));
        assert_eq!(MediaKind::from_extension("exe"), None);
        assert_eq!(MediaKind::from_extension(""), None);
    }

    #[test]
    fn test_media_kind_from_mime_str() {
        assert_eq!(
            MediaKind::from_mime_str("image/jpeg"),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::from_mime_str("video/webm"),
            Some(MediaKind::Video)
        );
        assert_eq!(
            MediaKind::from_mime_str("application/pdf"),
            Some(MediaKind::Document)
        );
        assert_eq!(MediaKind::from_mime_str("application/zip"), None);
    }

    #[test]
    fn test_media_file_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let media = MediaFile::from_path(&path).unwrap();
        assert_eq!(media.kind, MediaKind::Image);
        assert_eq!(media.name, "photo.png");
        assert_eq!(media.size, 16);
        assert_eq!(media.sha256.len(), 64);
        assert!(uuid::Uuid::parse_str(&media.id).is_ok());
    }

    #[test]
    fn test_media_file_from_path_unsupported() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("archive.zip");
        std::fs::write(&path, b"zip").unwrap();

        let result = MediaFile::from_path(&path);
        assert!(matches!(
            result,
            Err(crate::QuillcastError::Validation(_))
        ));
    }

    #[test]
    fn test_provider_kind_unknown_falls_back_to_mock() {
        let kind: ProviderKind = serde_json::from_str(r#""somebody-new""#).unwrap();
        assert_eq!(kind, ProviderKind::Mock);
    }

    #[test]
    fn test_provider_kind_known_names() {
        assert_eq!(
            serde_json::from_str::<ProviderKind>(r#""openai""#).unwrap(),
            ProviderKind::OpenAi
        );
        assert_eq!(
            serde_json::from_str::<ProviderKind>(r#""deepseek""#).unwrap(),
            ProviderKind::DeepSeek
        );
        assert_eq!(serde_json::to_string(&ProviderKind::Gemini).unwrap(), r#""gemini""#);
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.provider, ProviderKind::Mock);
        assert!(settings.api_keys.is_empty());
        assert!(settings.access_token.is_none());
    }

    #[test]
    fn test_settings_api_key_ignores_blank_values() {
        let mut settings = Settings::default();
        settings.api_keys.insert("openai".to_string(), "  ".to_string());
        assert!(settings.api_key("openai").is_none());

        settings
            .api_keys
            .insert("openai".to_string(), "sk-test".to_string());
        assert_eq!(settings.api_key("openai"), Some("sk-test"));
        assert!(settings.api_key("gemini").is_none());
    }

    #[test]
    fn test_settings_round_trip() {
        let mut settings = Settings {
            provider: ProviderKind::DeepSeek,
            api_keys: HashMap::new(),
            access_token: Some("opaque-token".to_string()),
        };
        settings
            .api_keys
            .insert("deepseek".to_string(), "sk-abc".to_string());

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_settings_deserializes_from_empty_object() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
