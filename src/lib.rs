// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # objectkit
//!
//! Hosted JSON objects with generated client types.
//!
//! A project is a named set of JSON objects. Plain objects are served as-is
//! from a public URL; API integration objects proxy an external HTTP
//! endpoint through a JSONPath expression and serve the extracted value.
//! For any object the kit generates illustrative type declarations in
//! TypeScript, Python and Java.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use objectkit::{codegen, TargetLanguage};
//! use serde_json::json;
//!
//! let value = json!({"name": "Ada", "home address": {"city": "London"}});
//! let source = codegen::render(&value, "user", TargetLanguage::TypeScript)?;
//!
//! // export interface User {
//! //   name: string;
//! //   "home address": HomeAddress;
//! // }
//! // ...
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       CLI / HTTP server                         │
//! │  types   try   try-all   url   serve (/api/:project/:key, ...)  │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴───────────────┬──────────────────┐
//! │   Project    │          Integration          │     Codegen      │
//! ├──────────────┼───────────────────────────────┼──────────────────┤
//! │ YAML / JSON  │ Validate → GET → JSONPath     │ Infer descriptor │
//! │ Store (lock) │ dataReturn write-back         │ TypeScript       │
//! │ API URLs     │ Validation/Network/Http/      │ Python TypedDict │
//! │              │ Extraction failures           │ Java POJO        │
//! └──────────────┴───────────────────────────────┴──────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Application configuration
pub mod config;

/// Type descriptor inference from JSON values
pub mod infer;

/// TypeScript, Python and Java source generation
pub mod codegen;

/// HTTP client used by the integration resolver
pub mod http;

/// API integration objects and their resolver
pub mod integration;

/// Projects, loading and the shared store
pub mod project;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use codegen::{render, render_samples, render_types, CodeGenerator, CodeSamples};
pub use integration::{IntegrationDescriptor, IntegrationError, Resolver};
pub use project::{load_project, Project, ProjectStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
