//! Integration descriptor
//!
//! An integration object is a JSON object with three reserved keys
//! (`apiUrl`, `JSONPath`, `dataReturn`) plus at most one extra field. The extra
//! field's key is the outbound header name and its value the header value.

use super::types::IntegrationError;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};

/// Key holding the endpoint URL
pub const API_URL_KEY: &str = "apiUrl";

/// Key holding the extraction path
pub const JSON_PATH_KEY: &str = "JSONPath";

/// Key holding the last result written by the resolver
pub const DATA_RETURN_KEY: &str = "dataReturn";

const RESERVED_KEYS: [&str; 3] = [API_URL_KEY, JSON_PATH_KEY, DATA_RETURN_KEY];

/// Declarative description of an external API call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "JsonObject", into = "JsonObject")]
pub struct IntegrationDescriptor {
    pub api_url: Option<String>,
    pub json_path: Option<String>,
    /// Dynamic header as `(name, value)`
    pub header: Option<(String, String)>,
    pub data_return: Option<JsonValue>,
}

impl IntegrationDescriptor {
    /// Create a descriptor for a URL
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: Some(api_url.into()),
            ..Self::default()
        }
    }

    /// Set the extraction path
    #[must_use]
    pub fn with_json_path(mut self, path: impl Into<String>) -> Self {
        self.json_path = Some(path.into());
        self
    }

    /// Set the dynamic header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.header = Some((name.into(), value.into()));
        self
    }

    /// Whether a JSON value is an integration object
    pub fn is_integration(value: &JsonValue) -> bool {
        value
            .as_object()
            .is_some_and(|map| map.contains_key(API_URL_KEY))
    }

    /// Parse a descriptor from a JSON object
    pub fn from_object(map: &JsonObject) -> Result<Self, IntegrationError> {
        let api_url = optional_string(map, API_URL_KEY)?;
        let json_path = optional_string(map, JSON_PATH_KEY)?;
        let data_return = map.get(DATA_RETURN_KEY).cloned();

        let extras: Vec<(&String, &JsonValue)> = map
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .collect();

        let header = match extras.as_slice() {
            [] => None,
            [(name, value)] => match value {
                JsonValue::String(s) => Some(((*name).clone(), s.clone())),
                _ => {
                    return Err(IntegrationError::validation(format!(
                        "header field '{name}' must be a string"
                    )))
                }
            },
            many => {
                let names: Vec<&str> = many.iter().map(|(k, _)| k.as_str()).collect();
                return Err(IntegrationError::validation(format!(
                    "at most one header field is allowed, found: {}",
                    names.join(", ")
                )));
            }
        };

        Ok(Self {
            api_url,
            json_path,
            header,
            data_return,
        })
    }

    /// Serialize back into the persisted object form
    pub fn to_object(&self) -> JsonObject {
        let mut map = JsonObject::new();
        if let Some(url) = &self.api_url {
            map.insert(API_URL_KEY.to_string(), JsonValue::String(url.clone()));
        }
        if let Some(path) = &self.json_path {
            map.insert(JSON_PATH_KEY.to_string(), JsonValue::String(path.clone()));
        }
        if let Some((name, value)) = &self.header {
            map.insert(name.clone(), JsonValue::String(value.clone()));
        }
        if let Some(data) = &self.data_return {
            map.insert(DATA_RETURN_KEY.to_string(), data.clone());
        }
        map
    }

    /// Rename the header field, keeping its value. Returns false when there is no header.
    pub fn rename_header(&mut self, new_name: impl Into<String>) -> bool {
        match &mut self.header {
            Some((name, _)) => {
                *name = new_name.into();
                true
            }
            None => false,
        }
    }

    /// Extraction path if it is set and not blank
    pub fn effective_json_path(&self) -> Option<&str> {
        self.json_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

impl TryFrom<JsonObject> for IntegrationDescriptor {
    type Error = IntegrationError;

    fn try_from(map: JsonObject) -> Result<Self, Self::Error> {
        Self::from_object(&map)
    }
}

impl From<IntegrationDescriptor> for JsonObject {
    fn from(descriptor: IntegrationDescriptor) -> Self {
        descriptor.to_object()
    }
}

fn optional_string(map: &JsonObject, key: &str) -> Result<Option<String>, IntegrationError> {
    match map.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(IntegrationError::validation(format!(
            "'{key}' must be a string"
        ))),
    }
}
