//! CLI commands and argument parsing

use crate::types::TargetLanguage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Object kit CLI
#[derive(Parser, Debug)]
#[command(name = "objectkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate type declarations for a JSON file
    Types {
        /// JSON file to describe
        #[arg(long)]
        file: PathBuf,

        /// Target language (all three when omitted)
        #[arg(short, long)]
        language: Option<TargetLanguage>,

        /// Name of the root type. Without it the file must be a
        /// `{ rootKey: value }` wrapper
        #[arg(long)]
        root_name: Option<String>,

        /// Maximum nesting depth (overrides the config file)
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Run one integration object and print its result
    Try {
        /// Project file (YAML or JSON)
        #[arg(short, long)]
        project: PathBuf,

        /// Object key
        #[arg(short, long)]
        object: String,
    },

    /// Run every integration object of a project
    TryAll {
        /// Project file (YAML or JSON)
        #[arg(short, long)]
        project: PathBuf,
    },

    /// Print the API URL of an object
    Url {
        /// Project name
        #[arg(short, long)]
        project: String,

        /// Object key
        #[arg(short, long)]
        object: String,

        /// Base URL (overrides the config file)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Start HTTP server mode
    Serve {
        /// Port to listen on (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory containing project files (overrides the config file)
        #[arg(long)]
        projects_dir: Option<PathBuf>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Human-readable output
    Pretty,
}
