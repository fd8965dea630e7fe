//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::cli::server::{serve, ServerConfig};
use crate::codegen::CodeGenerator;
use crate::config::AppConfig;
use crate::error::{Error, Result, ResultExt};
use crate::infer::TypeInferrer;
use crate::integration::Resolver;
use crate::project::{api_url, load_project, ProjectStore, TryOutcome};
use crate::types::{JsonValue, TargetLanguage};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Types {
                file,
                language,
                root_name,
                max_depth,
            } => self.types(
                file,
                *language,
                root_name.as_deref(),
                max_depth.unwrap_or(config.inference.max_depth),
            ),
            Commands::Try { project, object } => self.try_one(&config, project, object).await,
            Commands::TryAll { project } => self.try_all(&config, project).await,
            Commands::Url {
                project,
                object,
                base_url,
            } => {
                let base = base_url
                    .as_deref()
                    .unwrap_or(&config.server.public_base_url);
                let url = api_url(base, project, object)?;
                match self.cli.format {
                    OutputFormat::Json => self.emit(&json!({ "url": url })),
                    OutputFormat::Pretty => println!("{url}"),
                }
                Ok(())
            }
            Commands::Serve { port, projects_dir } => {
                let dir = projects_dir
                    .clone()
                    .unwrap_or_else(|| config.server.projects_dir.clone());
                let store = ProjectStore::load_dir(&dir)?;
                info!(
                    "Loaded {} project(s) from {}",
                    store.names().await.len(),
                    dir.display()
                );

                let server_config = ServerConfig {
                    port: port.unwrap_or(config.server.port),
                    public_base_url: config.server.public_base_url.clone(),
                    max_depth: config.inference.max_depth,
                };
                serve(server_config, store, self.resolver(&config)?).await
            }
        }
    }

    /// Load the config file, or defaults when none was given
    fn load_config(&self) -> Result<AppConfig> {
        match &self.cli.config {
            Some(path) => AppConfig::load(path),
            None => Ok(AppConfig::default()),
        }
    }

    fn resolver(&self, config: &AppConfig) -> Result<Resolver> {
        Resolver::with_config(config.resolver.http_config())
    }

    /// Generate type declarations for a JSON file
    fn types(
        &self,
        file: &Path,
        language: Option<TargetLanguage>,
        root_name: Option<&str>,
        max_depth: usize,
    ) -> Result<()> {
        if !file.exists() {
            return Err(Error::FileNotFound {
                path: file.display().to_string(),
            });
        }
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read '{}'", file.display()))?;
        let value: JsonValue = serde_json::from_str(&content)
            .with_context(|| format!("'{}' is not valid JSON", file.display()))?;

        let generator = CodeGenerator::with_inferrer(TypeInferrer::new().with_max_depth(max_depth));
        let samples = match root_name {
            Some(root_name) => generator.render_named_samples(&value, root_name)?,
            None => generator.render_samples(&value)?,
        };

        match (self.cli.format, language) {
            (OutputFormat::Json, Some(language)) => self.emit(&json!({
                "language": language,
                "source": samples.get(language),
            })),
            (OutputFormat::Json, None) => self.emit(&json!(samples)),
            (OutputFormat::Pretty, Some(language)) => print!("{}", samples.get(language)),
            (OutputFormat::Pretty, None) => {
                for language in TargetLanguage::ALL {
                    println!("=== {language} ===");
                    print!("{}", samples.get(language));
                    println!();
                }
            }
        }
        Ok(())
    }

    /// Run one integration object of a project file
    async fn try_one(&self, config: &AppConfig, project: &Path, object: &str) -> Result<()> {
        let project = load_project(project)?;
        let name = project.name.clone();
        let store = ProjectStore::from_projects([project]);
        let resolver = self.resolver(config)?;

        let start = Instant::now();
        let outcome = store.try_object(&resolver, &name, object).await?;
        info!(
            "Tried {}/{} in {}ms",
            name,
            object,
            start.elapsed().as_millis()
        );

        self.emit(&outcome.to_json());
        match outcome.result {
            Ok(_) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Run every integration object of a project file
    async fn try_all(&self, config: &AppConfig, project: &Path) -> Result<()> {
        let project = load_project(project)?;
        let name = project.name.clone();
        let store = ProjectStore::from_projects([project]);
        let resolver = self.resolver(config)?;

        let start = Instant::now();
        let outcomes = store.try_project(&resolver, &name).await?;
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            "Tried {} integration(s) of '{}' in {}ms ({} failed)",
            outcomes.len(),
            name,
            start.elapsed().as_millis(),
            failed
        );

        let report: Vec<JsonValue> = outcomes.iter().map(TryOutcome::to_json).collect();
        self.emit(&json!({
            "project": name,
            "results": report,
        }));

        if failed > 0 {
            return Err(Error::Other(format!(
                "{failed} of {} integration(s) failed",
                outcomes.len()
            )));
        }
        Ok(())
    }

    /// Print a JSON document in the selected format
    fn emit(&self, value: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}
