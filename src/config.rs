//! Application configuration
//!
//! Loaded from an optional YAML file. Every field has a default, so an empty
//! file (or no file) is a valid configuration.

use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::infer::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Integration resolver settings
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Type inference settings
    #[serde(default)]
    pub inference: InferenceSettings,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }
}

// ============================================================================
// Server
// ============================================================================

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory containing project files
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    /// Base URL generated API URLs start with
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            projects_dir: default_projects_dir(),
            public_base_url: default_public_base_url(),
        }
    }
}

fn default_port() -> u16 {
    8080
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("projects")
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

// ============================================================================
// Resolver
// ============================================================================

/// Integration resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// Request timeout in seconds; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User agent sent with integration requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl ResolverSettings {
    /// HTTP client configuration for the resolver
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder().user_agent(&self.user_agent);
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

fn default_user_agent() -> String {
    format!("objectkit/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================================
// Inference
// ============================================================================

/// Type inference settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceSettings {
    /// Maximum JSON nesting depth accepted
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
