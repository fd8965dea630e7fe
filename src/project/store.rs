//! In-memory project store

use super::loader::load_projects_dir;
use super::types::{ObjectKind, Project};
use crate::error::{Error, Result};
use crate::integration::{IntegrationError, Resolver, DATA_RETURN_KEY};
use crate::types::JsonValue;
use futures::future::join_all;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Result of trying one integration object
#[derive(Debug, Clone, PartialEq)]
pub struct TryOutcome {
    /// Object key
    pub key: String,
    /// Extracted value or classified failure
    pub result: std::result::Result<JsonValue, IntegrationError>,
}

impl TryOutcome {
    /// JSON report: `{"key", "success", "value" | "error"}`
    pub fn to_json(&self) -> JsonValue {
        match &self.result {
            Ok(value) => json!({ "key": self.key, "success": true, "value": value }),
            Err(e) => json!({ "key": self.key, "success": false, "error": e }),
        }
    }
}

/// Shared, mutable set of projects
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Arc<RwLock<BTreeMap<String, Project>>>,
}

impl ProjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `projects`
    pub fn from_projects(projects: impl IntoIterator<Item = Project>) -> Self {
        let map = projects
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        Self {
            projects: Arc::new(RwLock::new(map)),
        }
    }

    /// Load every project file in a directory
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_projects(load_projects_dir(dir)?))
    }

    /// Insert or replace a project
    pub async fn insert(&self, project: Project) {
        self.projects
            .write()
            .await
            .insert(project.name.clone(), project);
    }

    /// Project names, sorted
    pub async fn names(&self) -> Vec<String> {
        self.projects.read().await.keys().cloned().collect()
    }

    /// Snapshot of a project
    pub async fn get(&self, name: &str) -> Result<Project> {
        self.projects
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| Error::project_not_found(name))
    }

    /// Value served at an object's API URL
    pub async fn api_value(&self, name: &str, key: &str) -> Result<JsonValue> {
        let projects = self.projects.read().await;
        let project = projects
            .get(name)
            .ok_or_else(|| Error::project_not_found(name))?;
        project.api_value(key)
    }

    /// Try one integration object and store its new `dataReturn`.
    ///
    /// The lock is released while the request is in flight. Concurrent tries
    /// of the same object are not serialized: the one that finishes last
    /// overwrites the others.
    pub async fn try_object(&self, resolver: &Resolver, name: &str, key: &str) -> Result<TryOutcome> {
        let mut object = {
            let projects = self.projects.read().await;
            let project = projects
                .get(name)
                .ok_or_else(|| Error::project_not_found(name))?;
            let object = project.object(key)?;
            if ObjectKind::classify(object) != ObjectKind::Integration {
                return Err(Error::NotAnIntegration {
                    key: key.to_string(),
                });
            }
            object.clone()
        };

        let result = resolver.try_object(&mut object).await;

        let data_return = object
            .get(DATA_RETURN_KEY)
            .cloned()
            .unwrap_or(JsonValue::Null);
        let mut projects = self.projects.write().await;
        match projects
            .get_mut(name)
            .and_then(|p| p.data_info.get_mut(key))
            .and_then(JsonValue::as_object_mut)
        {
            Some(stored) => {
                stored.insert(DATA_RETURN_KEY.to_string(), data_return);
            }
            None => debug!("Object '{}/{}' removed while it was being tried", name, key),
        }

        Ok(TryOutcome {
            key: key.to_string(),
            result,
        })
    }

    /// Try every integration object of a project concurrently
    pub async fn try_project(&self, resolver: &Resolver, name: &str) -> Result<Vec<TryOutcome>> {
        let keys = self.get(name).await?.integration_keys();

        join_all(keys.iter().map(|key| self.try_object(resolver, name, key)))
            .await
            .into_iter()
            .collect()
    }
}
