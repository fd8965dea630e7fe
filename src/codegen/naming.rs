//! Identifier mangling for each target language
//!
//! These rules are part of the output contract: consumers cross-reference
//! generated names, so each function must stay deterministic.
//!
//! The rules are applied literally and never invent a name. A key with no
//! alphanumeric characters (`""`, `"---"`) mangles to an empty Python/Java
//! class name and an empty Java field name, and to `_` as a Python field name
//! when it had at least one character. The emitted declaration is then not
//! valid source in that language.

use regex::Regex;
use std::sync::LazyLock;

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]").unwrap());

static REPEATED_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

static CAMEL_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

/// TypeScript interface name: split on spaces, capitalize each word, concatenate.
///
/// Other characters are kept as-is, so `"my-key"` becomes `"My-key"`.
pub fn typescript_type_name(key: &str) -> String {
    capitalize_words(key)
}

/// Whether a TypeScript field key must be written as a string literal
pub fn typescript_needs_quotes(key: &str) -> bool {
    key.is_empty() || key.contains(' ') || key.contains('-')
}

/// TypeScript field key, quoted when required
pub fn typescript_field_key(key: &str) -> String {
    if typescript_needs_quotes(key) {
        // serde_json gives a correctly escaped double-quoted literal
        serde_json::to_string(key).unwrap_or_else(|_| format!("\"{key}\""))
    } else {
        key.to_string()
    }
}

/// Python class name: non-alphanumerics become spaces, then capitalize-concatenate
pub fn python_class_name(key: &str) -> String {
    capitalize_words(&NON_ALPHANUMERIC.replace_all(key, " "))
}

/// Python field name in snake_case
pub fn python_field_name(key: &str) -> String {
    let underscored = NON_ALPHANUMERIC.replace_all(key, "_");
    let collapsed = REPEATED_UNDERSCORES.replace_all(&underscored, "_");
    let snake = CAMEL_BOUNDARY.replace_all(&collapsed, "${1}_${2}");
    snake.to_lowercase()
}

/// Java class name, same rule as the Python class name
pub fn java_class_name(key: &str) -> String {
    python_class_name(key)
}

/// Java field name in camelCase
pub fn java_field_name(key: &str) -> String {
    let sanitized = NON_ALPHANUMERIC.replace_all(key, " ");
    let mut words = sanitized.split(' ').filter(|w| !w.is_empty());

    let mut out = match words.next() {
        Some(first) => lowercase_first(first),
        None => return String::new(),
    };
    for word in words {
        out.push_str(&capitalize_first(word));
    }
    out
}

/// Suffix used by `getX` / `setX` accessors for a Java field
pub fn java_accessor_suffix(field_name: &str) -> String {
    capitalize_first(field_name)
}

fn capitalize_words(s: &str) -> String {
    s.split(' ')
        .filter(|w| !w.is_empty())
        .map(capitalize_first)
        .collect()
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
