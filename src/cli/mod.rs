//! CLI module
//!
//! Command-line interface for generating types and running projects.
//!
//! # Commands
//!
//! - `types` - Generate type declarations for a JSON file
//! - `try` - Run one integration object
//! - `try-all` - Run every integration object of a project
//! - `url` - Print an object's API URL
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
pub use server::{router, serve, ServerConfig};
