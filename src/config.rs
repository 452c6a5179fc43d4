//! Configuration management for the orange console.
//!
//! Handles loading configuration from TOML files and environment variables.
//! The only configurable collaborator is the query server endpoint.

use crate::error::{OrangeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Environment variable overriding the configured server URL (read by the CLI).
pub const SERVER_URL_ENV: &str = "ORANGE_SERVER_URL";

/// Path of the execution endpoint, relative to the server base URL.
pub const EXEC_PATH: &str = "/api/exec";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Query server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Query server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the query server (e.g., "http://localhost:8080").
    #[serde(default = "default_url")]
    pub url: String,

    /// Optional request timeout in seconds. No timeout when absent.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: None,
        }
    }
}

impl ServerConfig {
    /// Creates a server config pointing at the given base URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: None,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Returns the request timeout, if any. Zero means no timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Validates the base URL and returns the full execution endpoint.
    pub fn exec_endpoint(&self) -> Result<Url> {
        let base = Url::parse(self.url.trim())
            .map_err(|e| OrangeError::config(format!("Invalid server URL '{}': {e}", self.url)))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(OrangeError::config(format!(
                "Invalid scheme '{}'. Expected 'http' or 'https'",
                base.scheme()
            )));
        }

        if base.cannot_be_a_base() {
            return Err(OrangeError::config(format!(
                "Invalid server URL '{}': not a base URL",
                self.url
            )));
        }

        // Query and fragment belong to the base URL, not the endpoint
        let mut endpoint = base.clone();
        endpoint.set_path(&format!("{}{EXEC_PATH}", base.path().trim_end_matches('/')));
        endpoint.set_query(None);
        endpoint.set_fragment(None);
        Ok(endpoint)
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orange")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| OrangeError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            OrangeError::config(format!("{}: {}", path.display(), e))
        })
    }
}
