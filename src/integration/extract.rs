//! JSONPath extraction
//!
//! A definite path (no wildcard, filter, recursive descent, union or slice)
//! yields its single match unwrapped. Any other path yields an array of all
//! matches.
//!
//! Paths are evaluated by `jsonpath-rust`. A path that repeats the root
//! (`$$`) is rejected here, since the crate would otherwise treat it as `$`.
//! Negative indices such as `$.items[-1]` are not supported by the crate and
//! surface as an invalid-path extraction error.

use super::types::IntegrationError;
use jsonpath_rust::JsonPath;
use serde_json::Value;

/// Apply an optional JSONPath to a response body
pub fn extract(body: &Value, path: Option<&str>) -> Result<Value, IntegrationError> {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(body.clone());
    };

    let path = normalize_path(path);
    if path.starts_with("$$") {
        return Err(IntegrationError::extraction(format!(
            "Invalid JSONPath: '{path}' repeats the root"
        )));
    }
    let mut matches = find_all(body, &path)?;

    if matches.is_empty() {
        return Err(IntegrationError::extraction("JSONPath produced no results"));
    }

    if is_definite(&path) && matches.len() == 1 {
        return Ok(matches.remove(0));
    }
    Ok(Value::Array(matches))
}

/// Prefix `$.` onto paths written without a root
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('$') {
        path.to_string()
    } else if path.starts_with('[') {
        format!("${path}")
    } else {
        format!("$.{path}")
    }
}

/// Whether a path can address at most one node
pub fn is_definite(path: &str) -> bool {
    if path.contains('*') || path.contains("..") || path.contains('?') {
        return false;
    }

    let mut in_brackets = false;
    let mut quote: Option<char> = None;
    for c in path.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') if in_brackets => quote = Some(c),
            (None, '[') => in_brackets = true,
            (None, ']') => in_brackets = false,
            (None, ',' | ':') if in_brackets => return false,
            _ => {}
        }
    }
    true
}

fn find_all(body: &Value, path: &str) -> Result<Vec<Value>, IntegrationError> {
    let jp: JsonPath = JsonPath::try_from(path)
        .map_err(|e| IntegrationError::extraction(format!("Invalid JSONPath: {e}")))?;

    match jp.find(body) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
