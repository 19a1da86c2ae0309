//! Client-side configuration.
//!
//! Reads/writes `~/.genova/config.toml`. Only the server URL and the data
//! directory live here — credentials go into the redb store under the
//! data directory, never into the config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Client configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Server URL (e.g. "https://api.genova.app").
    #[serde(default)]
    pub server: String,

    /// Directory holding the credential store.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: String::new(),
            data_dir: String::new(),
        }
    }
}

impl CliConfig {
    /// Default config file path: ~/.genova/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Directory for the credential store, defaulting to ~/.genova/data.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if self.data_dir.is_empty() {
            dirs_path().join("data")
        } else {
            PathBuf::from(&self.data_dir)
        }
    }
}

/// Return the Genova config directory (~/.genova).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".genova")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.server.is_empty());
        assert!(config.data_dir.is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let config = CliConfig {
            server: "http://localhost:8080".to_string(),
            data_dir: "/tmp/genova".to_string(),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.server, "http://localhost:8080");
        assert_eq!(back.data_dir, "/tmp/genova");
    }

    #[test]
    fn test_data_dir_fallback() {
        let config = CliConfig::default();
        assert!(config.resolve_data_dir().ends_with(".genova/data"));
    }
}
