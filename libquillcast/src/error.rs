//! Error types for Quillcast

use thiserror::Error;

pub type Result<T> = std::result::Result<T, QuillcastError>;

#[derive(Error, Debug)]
pub enum QuillcastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Invalid input: {0}")]
    Validation(String),
}

impl QuillcastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            QuillcastError::Validation(_) => 3,
            QuillcastError::Config(_) => 2,
            QuillcastError::Generation(_) => 1,
            QuillcastError::Storage(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("No API key configured for provider: {0}")]
    MissingApiKey(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database operation failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored record is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Backend unreachable: {0}")]
    Network(String),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Response missing generated content: {0}")]
    MissingContent(String),
}
