//! Configuration loading and management
//!
//! Handles parsing of the `config.toml` file under the platform config
//! directory (overridable per invocation with CLI flags).

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Local store settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Local store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the local store (default: platform data dir)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a `config.toml` file
    pub fn load(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &PathBuf) -> Self {
        let config_path = dir.join("config.toml");
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &PathBuf) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(Error::InvalidConfig(
                "api.base_url cannot be empty".to_string(),
            ));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "api.base_url must start with http:// or https:// (got '{url}')"
            )));
        }
        Ok(())
    }
}

/// Platform directories for tdo (`~/.config/tdo`, `~/.local/share/tdo`, ...)
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "tdo").ok_or_else(|| {
        Error::OperationFailed("could not determine a home directory for tdo state".to_string())
    })
}

/// Load the effective configuration for this invocation
///
/// Reads `config.toml` from the platform config directory; missing file
/// or unparsable content falls back to defaults.
pub fn load_default() -> Result<Config> {
    let dirs = project_dirs()?;
    Ok(Config::load_from_dir(&dirs.config_dir().to_path_buf()))
}

/// Resolve the local store directory
///
/// Precedence: CLI flag / env override, then `storage.dir` from config,
/// then the platform data directory.
pub fn resolve_data_dir(flag: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = &config.storage.dir {
        return Ok(dir.clone());
    }
    Ok(project_dirs()?.data_dir().to_path_buf())
}
