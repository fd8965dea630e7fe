//! Project types

use crate::codegen::{CodeGenerator, CodeSamples};
use crate::error::{Error, Result};
use crate::integration::{IntegrationDescriptor, DATA_RETURN_KEY};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use url::Url;

/// How a hosted object behaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Plain key/value data served as-is
    Plain,
    /// Proxies an external endpoint through a JSONPath
    Integration,
}

impl ObjectKind {
    /// Classify an object value
    pub fn classify(value: &JsonValue) -> Self {
        if IntegrationDescriptor::is_integration(value) {
            ObjectKind::Integration
        } else {
            ObjectKind::Plain
        }
    }
}

/// A named collection of hosted objects
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    /// Project name, used in API URLs
    #[serde(default)]
    pub name: String,

    /// Object key -> object value
    #[serde(rename = "dataInfo", default)]
    pub data_info: JsonObject,
}

impl Project {
    /// Create an empty project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_info: JsonObject::new(),
        }
    }

    /// Add an object
    #[must_use]
    pub fn with_object(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.data_info.insert(key.into(), value);
        self
    }

    /// Look up an object
    pub fn object(&self, key: &str) -> Result<&JsonValue> {
        self.data_info
            .get(key)
            .ok_or_else(|| Error::object_not_found(&self.name, key))
    }

    /// Kind of an object
    pub fn kind(&self, key: &str) -> Result<ObjectKind> {
        self.object(key).map(ObjectKind::classify)
    }

    /// Keys of every integration object, in project order
    pub fn integration_keys(&self) -> Vec<String> {
        self.data_info
            .iter()
            .filter(|(_, value)| ObjectKind::classify(value) == ObjectKind::Integration)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Value served at the object's API URL.
    ///
    /// Plain objects are served whole. Integration objects serve their last
    /// `dataReturn`, or `null` if they were never tried.
    pub fn api_value(&self, key: &str) -> Result<JsonValue> {
        let value = self.object(key)?;
        Ok(match ObjectKind::classify(value) {
            ObjectKind::Plain => value.clone(),
            ObjectKind::Integration => value
                .get(DATA_RETURN_KEY)
                .cloned()
                .unwrap_or(JsonValue::Null),
        })
    }

    /// Code samples describing the value served for an object
    pub fn code_samples(&self, key: &str, generator: &CodeGenerator) -> Result<CodeSamples> {
        let mut wrapper = JsonObject::new();
        wrapper.insert(key.to_string(), self.api_value(key)?);
        generator.render_samples(&JsonValue::Object(wrapper))
    }
}

/// Public URL of an object: `<base>/api/<project>/<key>`
pub fn api_url(base: &str, project: &str, key: &str) -> Result<String> {
    let mut url = Url::parse(base)
        .map_err(|e| Error::config(format!("Invalid public base URL '{base}': {e}")))?;

    url.path_segments_mut()
        .map_err(|()| Error::config(format!("Public base URL '{base}' cannot have a path")))?
        .pop_if_empty()
        .push("api")
        .push(project)
        .push(key);

    Ok(url.to_string())
}
