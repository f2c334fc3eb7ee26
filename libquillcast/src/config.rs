//! Configuration management for Quillcast

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

impl Config {
    /// Load configuration from the default location, falling back to the
    /// built-in defaults when no config file exists yet.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Ok(Self::default_config())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            database: DatabaseConfig {
                path: "~/.local/share/quillcast/queue.db".to_string(),
            },
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("QUILLCAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("quillcast").join("config.toml"))
}

/// Resolve the database path, expanding a tilde when present.
///
/// `QUILLCAST_DB_PATH` overrides everything; otherwise the configured path is
/// used, or the XDG data directory default when neither is set.
pub fn resolve_db_path(configured: Option<&str>) -> Result<PathBuf> {
    if let Ok(path) = std::env::var("QUILLCAST_DB_PATH") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    if let Some(path) = configured {
        return Ok(PathBuf::from(shellexpand::tilde(path).to_string()));
    }

    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("quillcast").join("queue.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_points_at_data_dir() {
        let config = Config::default_config();
        assert!(config.database.path.contains("quillcast"));
    }

    #[test]
    fn test_load_from_path_parses_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[database]\npath = \"/tmp/quillcast-test.db\"\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.database.path, "/tmp/quillcast-test.db");
    }

    #[test]
    fn test_load_from_path_rejects_bad_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "database = ").unwrap();

        let result = Config::load_from_path(&path);
        assert!(matches!(
            result,
            Err(crate::QuillcastError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_load_from_missing_path_is_read_error() {
        let result = Config::load_from_path(Path::new("/definitely/not/here.toml"));
        assert!(matches!(
            result,
            Err(crate::QuillcastError::Config(ConfigError::Read(_)))
        ));
    }

    #[test]
    fn test_resolve_db_path_expands_configured_value() {
        let path = resolve_db_path(Some("/tmp/explicit.db")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/explicit.db"));
    }
}
