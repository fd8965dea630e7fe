//! Integration error taxonomy
//!
//! Every resolver failure is one of these variants and is returned as data.
//! The serialized form is what gets written into `dataReturn` on failure.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Classified failure of a single integration attempt
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrationError {
    /// Input is missing or malformed; no request was sent
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Transport failure (DNS, TLS, timeout, connection refused)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-2xx response, with the parsed body when it was JSON
    #[error("HTTP {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Value>,
    },

    /// JSONPath was invalid or matched nothing
    #[error("Extraction error: {message}")]
    Extraction { message: String },
}

impl IntegrationError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http(status: u16, status_text: impl Into<String>, body: Option<Value>) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
            body,
        }
    }

    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    /// Whether invoking again unchanged may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            IntegrationError::Network { .. } => true,
            IntegrationError::Http { status, .. } => matches!(status, 429 | 500..=599),
            IntegrationError::Validation { .. } | IntegrationError::Extraction { .. } => false,
        }
    }

    /// Value stored in `dataReturn` for this failure
    pub fn to_data_return(&self) -> Value {
        json!({ "error": self })
    }
}
