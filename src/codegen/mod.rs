//! Source code generation module
//!
//! Renders inferred type descriptors as TypeScript interfaces, Python
//! `TypedDict` classes and Java POJOs.
//!
//! # Overview
//!
//! One generic walk over the descriptor tree is parameterized by a
//! [`LanguageRenderer`]. Each renderer owns its scalar-name table, its
//! declaration template and its identifier rules (see [`naming`]).
//!
//! Output is illustrative sample code; it is not validated against any
//! compiler. Arrays are typed from their first element only, so mixed-type
//! arrays render lossily.

mod languages;
pub mod naming;
mod renderer;

pub use languages::{renderer_for, JavaRenderer, PythonRenderer, TypeScriptRenderer};
pub use renderer::{declarations, source, type_ref, LanguageRenderer, RenderedField};

use crate::error::Result;
use crate::infer::{RootDescriptor, TypeInferrer};
use crate::types::{JsonValue, TargetLanguage};
use serde::{Deserialize, Serialize};

/// The same value rendered in every target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSamples {
    pub typescript: String,
    pub python: String,
    pub java: String,
}

impl CodeSamples {
    /// Sample for one language
    pub fn get(&self, language: TargetLanguage) -> &str {
        match language {
            TargetLanguage::TypeScript => &self.typescript,
            TargetLanguage::Python => &self.python,
            TargetLanguage::Java => &self.java,
        }
    }
}

/// Code generator with a configurable inferrer
#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    inferrer: TypeInferrer,
}

impl CodeGenerator {
    /// Create a generator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator around a configured inferrer
    pub fn with_inferrer(inferrer: TypeInferrer) -> Self {
        Self { inferrer }
    }

    /// Full source text for `value`, its root type named after `root_name`
    pub fn render(
        &self,
        value: &JsonValue,
        root_name: &str,
        language: TargetLanguage,
    ) -> Result<String> {
        let root = self.inferrer.infer(root_name, value)?;
        Ok(source(renderer_for(language), &root))
    }

    /// One string per declaration for a `{ rootKey: innerValue }` wrapper
    pub fn render_types(&self, value: &JsonValue, language: TargetLanguage) -> Result<Vec<String>> {
        let root = self.inferrer.infer_wrapped(value)?;
        Ok(declarations(renderer_for(language), &root))
    }

    /// Full source text in every language for a `{ rootKey: innerValue }` wrapper
    pub fn render_samples(&self, value: &JsonValue) -> Result<CodeSamples> {
        let root = self.inferrer.infer_wrapped(value)?;
        Ok(samples_for(&root))
    }

    /// Full source text in every language, the root type named after `root_name`
    pub fn render_named_samples(&self, value: &JsonValue, root_name: &str) -> Result<CodeSamples> {
        let root = self.inferrer.infer(root_name, value)?;
        Ok(samples_for(&root))
    }
}

fn samples_for(root: &RootDescriptor) -> CodeSamples {
    CodeSamples {
        typescript: source(renderer_for(TargetLanguage::TypeScript), root),
        python: source(renderer_for(TargetLanguage::Python), root),
        java: source(renderer_for(TargetLanguage::Java), root),
    }
}

/// Render full source text with default settings
pub fn render(value: &JsonValue, root_name: &str, language: TargetLanguage) -> Result<String> {
    CodeGenerator::new().render(value, root_name, language)
}

/// Render one string per declaration with default settings
pub fn render_types(value: &JsonValue, language: TargetLanguage) -> Result<Vec<String>> {
    CodeGenerator::new().render_types(value, language)
}

/// Render every language with default settings
pub fn render_samples(value: &JsonValue) -> Result<CodeSamples> {
    CodeGenerator::new().render_samples(value)
}
