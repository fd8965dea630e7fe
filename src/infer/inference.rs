//! Type descriptor inference from JSON values

use super::types::{FieldDescriptor, NamedComposite, Primitive, RootDescriptor, TypeDescriptor};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Default maximum nesting depth accepted by the inferrer
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Root type name used when a value is not a single-key wrapper
pub const ROOT_NAME: &str = "Root";

/// Structural type inferrer
#[derive(Debug, Clone)]
pub struct TypeInferrer {
    /// Maximum nesting depth below the root value
    max_depth: usize,
}

impl Default for TypeInferrer {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInferrer {
    /// Create a new inferrer with default settings
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set maximum depth for nested values
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Configured maximum depth
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Infer the descriptor for `value`, naming its root type after `root_name`
    pub fn infer(&self, root_name: &str, value: &Value) -> Result<RootDescriptor> {
        // Objects held by a root-level array need a name distinct from the alias.
        let element_key = match value {
            Value::Array(_) => format!("{root_name} item"),
            _ => root_name.to_string(),
        };

        Ok(RootDescriptor {
            name: root_name.to_string(),
            descriptor: self.infer_value(&element_key, value, 0)?,
        })
    }

    /// Infer the descriptor for a `{ rootKey: innerValue }` wrapper.
    ///
    /// The wrapper's only key names the root and `innerValue` is described.
    /// Anything other than a single-key object is described whole under
    /// [`ROOT_NAME`].
    pub fn infer_wrapped(&self, value: &Value) -> Result<RootDescriptor> {
        match value {
            Value::Object(map) if map.len() == 1 => match map.iter().next() {
                Some((key, inner)) => self.infer(key, inner),
                None => self.infer(ROOT_NAME, value),
            },
            _ => self.infer(ROOT_NAME, value),
        }
    }

    fn infer_value(&self, key: &str, value: &Value, depth: usize) -> Result<TypeDescriptor> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        let descriptor = match value {
            Value::Null => TypeDescriptor::Primitive(Primitive::Null),
            Value::Bool(_) => TypeDescriptor::Primitive(Primitive::Boolean),
            Value::String(_) => TypeDescriptor::Primitive(Primitive::String),
            Value::Number(n) => TypeDescriptor::Primitive(Primitive::Number {
                integral: is_integral(n),
            }),
            // Only the first element informs the element type
            Value::Array(items) => match items.first() {
                Some(first) => TypeDescriptor::ArrayOf(Some(Box::new(
                    self.infer_value(key, first, depth + 1)?,
                ))),
                None => TypeDescriptor::ArrayOf(None),
            },
            Value::Object(map) => TypeDescriptor::Named(self.infer_composite(key, map, depth)?),
        };

        Ok(descriptor)
    }

    fn infer_composite(
        &self,
        key: &str,
        map: &Map<String, Value>,
        depth: usize,
    ) -> Result<NamedComposite> {
        let fields = map
            .iter()
            .map(|(field_key, val)| {
                Ok(FieldDescriptor {
                    key: field_key.clone(),
                    descriptor: self.infer_value(field_key, val, depth + 1)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(NamedComposite {
            key: key.to_string(),
            fields,
        })
    }
}

/// Infer a descriptor with default settings (convenience function)
pub fn infer_descriptor(root_name: &str, value: &Value) -> Result<RootDescriptor> {
    TypeInferrer::new().infer(root_name, value)
}

/// Infer a descriptor for a single-key wrapper with default settings
pub fn infer_wrapped(value: &Value) -> Result<RootDescriptor> {
    TypeInferrer::new().infer_wrapped(value)
}

fn is_integral(n: &serde_json::Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64()
        .is_some_and(|f| f.is_finite() && f.fract() == 0.0)
}
