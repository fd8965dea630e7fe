//! Common types used throughout objectkit
//!
//! Shared type aliases and the target language selector.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Target Language
// ============================================================================

/// Language a structural type description is rendered into
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// TypeScript interfaces
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    /// Python `TypedDict` classes
    #[value(alias = "py")]
    Python,
    /// Java POJOs with accessors
    Java,
}

impl TargetLanguage {
    /// Every supported language, in display order
    pub const ALL: [TargetLanguage; 3] = [
        TargetLanguage::TypeScript,
        TargetLanguage::Python,
        TargetLanguage::Java,
    ];

    /// Lowercase tag used on the wire and in the CLI
    pub fn as_str(self) -> &'static str {
        match self {
            TargetLanguage::TypeScript => "typescript",
            TargetLanguage::Python => "python",
            TargetLanguage::Java => "java",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
