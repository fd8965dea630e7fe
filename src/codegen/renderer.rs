//! Renderer trait and the shared declaration walk
//!
//! A [`LanguageRenderer`] only knows its scalar names, composite templates and
//! identifier rules. The traversal over the descriptor tree lives here once.

use crate::infer::{Primitive, RootDescriptor, TypeDescriptor};
use crate::types::TargetLanguage;

/// A field ready to be written into a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField<'a> {
    /// Raw JSON key; the renderer applies its own field-name rule
    pub key: &'a str,
    /// Fully rendered type reference
    pub type_ref: String,
}

/// Per-language rendering capability
pub trait LanguageRenderer: Send + Sync {
    /// Language this renderer produces
    fn language(&self) -> TargetLanguage;

    /// Imports placed before the declarations by full-source rendering
    fn preamble(&self) -> Option<&'static str> {
        None
    }

    /// Type identifier derived from a JSON key
    fn type_name(&self, key: &str) -> String;

    /// Scalar type name
    fn primitive(&self, primitive: Primitive) -> &'static str;

    /// Array of an already-rendered element type
    fn array_of(&self, element: &str) -> String;

    /// Array whose element type is unknown
    fn unknown_array(&self) -> &'static str;

    /// Declaration of a named structural type
    fn declaration(&self, name: &str, fields: &[RenderedField<'_>]) -> String;

    /// Declaration naming a non-object root type
    fn alias(&self, name: &str, type_ref: &str) -> String;
}

/// Render a type reference for a descriptor
pub fn type_ref(renderer: &dyn LanguageRenderer, descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Primitive(primitive) => renderer.primitive(*primitive).to_string(),
        TypeDescriptor::ArrayOf(Some(element)) => {
            renderer.array_of(&type_ref(renderer, element))
        }
        TypeDescriptor::ArrayOf(None) => renderer.unknown_array().to_string(),
        TypeDescriptor::Named(composite) => renderer.type_name(&composite.key),
    }
}

/// Render every declaration for a root descriptor.
///
/// The root comes first, then nested types in the order their keys first
/// appear. Identical shapes under different keys are declared separately.
pub fn declarations(renderer: &dyn LanguageRenderer, root: &RootDescriptor) -> Vec<String> {
    let mut out = Vec::new();

    if root.is_alias() {
        out.push(renderer.alias(
            &renderer.type_name(&root.name),
            &type_ref(renderer, &root.descriptor),
        ));
    }

    for composite in root.composites() {
        let fields: Vec<RenderedField<'_>> = composite
            .fields
            .iter()
            .map(|field| RenderedField {
                key: &field.key,
                type_ref: type_ref(renderer, &field.descriptor),
            })
            .collect();
        out.push(renderer.declaration(&renderer.type_name(&composite.key), &fields));
    }

    out
}

/// Render complete source text: preamble, then declarations separated by blank lines
pub fn source(renderer: &dyn LanguageRenderer, root: &RootDescriptor) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(preamble) = renderer.preamble() {
        parts.push(preamble.to_string());
    }
    parts.extend(declarations(renderer, root));

    let mut text = parts.join("\n\n");
    text.push('\n');
    text
}
