//! Project file loader
//!
//! Reads projects from `.yaml`, `.yml` or `.json` files. A project without a
//! `name` takes its file stem.

use super::types::Project;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Serialization format of a project file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(ProjectFormat::Yaml),
            "json" => Some(ProjectFormat::Json),
            _ => None,
        }
    }
}

/// Load a project from a file
pub fn load_project(path: impl AsRef<Path>) -> Result<Project> {
    let path = path.as_ref();
    let format = ProjectFormat::from_path(path).ok_or_else(|| {
        Error::config(format!(
            "Unsupported project file '{}': expected .yaml, .yml or .json",
            path.display()
        ))
    })?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read project file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let mut project = load_project_from_str(&content, format)?;
    if project.name.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            project.name = stem.to_string();
        }
    }

    validate_project(&project)?;
    debug!(
        "Loaded project '{}' with {} objects from {}",
        project.name,
        project.data_info.len(),
        path.display()
    );
    Ok(project)
}

/// Parse a project from a string
pub fn load_project_from_str(content: &str, format: ProjectFormat) -> Result<Project> {
    let project = match format {
        ProjectFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse project YAML: {e}")))?,
        ProjectFormat::Json => serde_json::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse project JSON: {e}")))?,
    };
    Ok(project)
}

/// Load every project file in a directory, sorted by name
pub fn load_projects_dir(dir: impl AsRef<Path>) -> Result<Vec<Project>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| {
        Error::config(format!(
            "Failed to read projects directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut projects = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && ProjectFormat::from_path(&path).is_some() {
            projects.push(load_project(&path)?);
        }
    }
    projects.sort_by(|a, b| a.name.cmp(&b.name));

    let mut seen = HashSet::new();
    for project in &projects {
        if !seen.insert(project.name.as_str()) {
            return Err(Error::config(format!(
                "Duplicate project name '{}' in {}",
                project.name,
                dir.display()
            )));
        }
    }

    info!("Loaded {} projects from {}", projects.len(), dir.display());
    Ok(projects)
}

/// Validate a project definition
fn validate_project(project: &Project) -> Result<()> {
    if project.name.is_empty() {
        return Err(Error::config("Project name cannot be empty"));
    }
    if project.name.contains('/') {
        return Err(Error::config(format!(
            "Project name '{}' cannot contain '/'",
            project.name
        )));
    }
    Ok(())
}
