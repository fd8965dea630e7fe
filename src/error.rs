//! Error types for objectkit
//!
//! This module defines the crate-wide error hierarchy. The API Integration
//! Resolver reports its failures as data through
//! [`IntegrationError`](crate::integration::IntegrationError); that type
//! converts into [`Error`] for the CLI and server plumbing.

use crate::integration::IntegrationError;
use thiserror::Error;

/// The main error type for objectkit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Inference Errors
    // ============================================================================
    #[error("JSON nesting exceeds the maximum inference depth of {max_depth}")]
    DepthExceeded { max_depth: usize },

    // ============================================================================
    // Project Errors
    // ============================================================================
    #[error("Project '{name}' not found")]
    ProjectNotFound { name: String },

    #[error("Object '{key}' not found in project '{project}'")]
    ObjectNotFound { project: String, key: String },

    #[error("Object '{key}' is not an API integration object")]
    NotAnIntegration { key: String },

    #[error(transparent)]
    Integration(#[from] IntegrationError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a project-not-found error
    pub fn project_not_found(name: impl Into<String>) -> Self {
        Self::ProjectNotFound { name: name.into() }
    }

    /// Create an object-not-found error
    pub fn object_not_found(project: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ObjectNotFound {
            project: project.into(),
            key: key.into(),
        }
    }

    /// Check if this error means the caller asked for something that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ProjectNotFound { .. } | Error::ObjectNotFound { .. } | Error::FileNotFound { .. }
        )
    }
}

/// Result type alias for objectkit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
