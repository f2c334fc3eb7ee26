//! Quillcast - local drafting, AI generation, and scheduling for social posts
//!
//! This library holds the post lifecycle, the pluggable generation-provider
//! layer, and the persistence contract shared by the Quillcast command-line
//! tools. Publishing itself is a manual hand-off and lives outside this
//! crate.

pub mod config;
pub mod error;
pub mod logging;
pub mod providers;
pub mod scheduling;
pub mod service;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{QuillcastError, Result};
pub use providers::{select_provider, Provider};
pub use service::QuillcastService;
pub use store::Store;
pub use types::{MediaFile, MediaKind, Post, PostStatus, ProviderKind, Settings};
