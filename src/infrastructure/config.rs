//! Configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The file is not valid YAML for [`Config`]
    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Jenkins server
    pub jenkins_url: String,
    /// User name for basic authentication
    pub username: Option<String>,
    /// API token of `username`
    pub api_token: Option<String>,
    /// Timeout of a single HTTP request, in seconds
    pub timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jenkins_url: "http://localhost:8080".to_string(),
            username: None,
            api_token: None,
            timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads a YAML file; keys it leaves out keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(serde_yaml::from_str(&yaml)?)
    }

    /// Replaces the connection settings that are given
    #[must_use]
    pub fn with_overrides(
        mut self,
        jenkins_url: Option<String>,
        username: Option<String>,
        api_token: Option<String>,
    ) -> Self {
        if let Some(url) = jenkins_url {
            self.jenkins_url = url;
        }
        if username.is_some() {
            self.username = username;
        }
        if api_token.is_some() {
            self.api_token = api_token;
        }
        self
    }
}
