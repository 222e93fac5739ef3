//! Grader configuration management

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Name of the directory used under the platform config and data dirs
pub const APP_DIR_NAME: &str = "essay-grader";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,
}

/// Grader configuration, stored as TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraderConfig {
    /// Base URL of the grading service
    pub endpoint: String,

    /// Path of the grading route, resolved against `endpoint`
    pub grade_path: String,

    /// Transport timeout for one grading request
    pub request_timeout_secs: u64,

    /// Where the interactive UI writes its log
    pub log_file: Option<PathBuf>,
}

impl Default for GraderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000".to_string(),
            grade_path: "/grade-essay".to_string(),
            request_timeout_secs: 30,
            log_file: None,
        }
    }
}

impl GraderConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load configuration from file, falling back to defaults if it does not exist
    pub async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: GraderConfig = toml::from_str(&content)?;
        config.validate()?;

        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ConfigError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grading_url()?;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL of the grading route.
    ///
    /// `grade_path` is resolved the way a browser resolves a link, so an
    /// absolute path replaces whatever path `endpoint` carries.
    pub fn grading_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let base = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(format!("unsupported scheme '{}'", other))),
        }

        base.join(&self.grade_path).map_err(|e| invalid(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Log file for the interactive UI
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME).join("essay-grader.log"))
        })
    }
}
