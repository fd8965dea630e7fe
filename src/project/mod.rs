//! Project module
//!
//! A project is a named `dataInfo` map of hosted objects. Each object is either
//! plain JSON data or an integration descriptor (it has an `apiUrl`).
//!
//! # Overview
//!
//! - [`load_project`] / [`load_projects_dir`] read projects from YAML or JSON files
//! - [`ProjectStore`] holds them in memory and runs integrations against them
//! - [`api_url`] builds the public URL an object is served at

mod loader;
mod store;
mod types;

pub use loader::{load_project, load_project_from_str, load_projects_dir, ProjectFormat};
pub use store::{ProjectStore, TryOutcome};
pub use types::{api_url, ObjectKind, Project};

#[cfg(test)]
mod tests;
