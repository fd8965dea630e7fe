//! TypeScript, Python and Java renderers

use super::naming::{
    java_accessor_suffix, java_class_name, java_field_name, python_class_name, python_field_name,
    typescript_field_key, typescript_type_name,
};
use super::renderer::{LanguageRenderer, RenderedField};
use crate::infer::Primitive;
use crate::types::TargetLanguage;
use std::fmt::Write as _;

// ============================================================================
// TypeScript
// ============================================================================

/// Renders `export interface` declarations
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptRenderer;

impl LanguageRenderer for TypeScriptRenderer {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::TypeScript
    }

    fn type_name(&self, key: &str) -> String {
        typescript_type_name(key)
    }

    fn primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "string",
            Primitive::Number { .. } => "number",
            Primitive::Boolean => "boolean",
            Primitive::Null => "null",
        }
    }

    fn array_of(&self, element: &str) -> String {
        format!("{element}[]")
    }

    fn unknown_array(&self) -> &'static str {
        "any[]"
    }

    fn declaration(&self, name: &str, fields: &[RenderedField<'_>]) -> String {
        if fields.is_empty() {
            return format!("export interface {name} {{}}");
        }

        let mut out = format!("export interface {name} {{\n");
        for field in fields {
            let _ = writeln!(
                out,
                "  {}: {};",
                typescript_field_key(field.key),
                field.type_ref
            );
        }
        out.push('}');
        out
    }

    fn alias(&self, name: &str, type_ref: &str) -> String {
        format!("export type {name} = {type_ref};")
    }
}

// ============================================================================
// Python
// ============================================================================

/// Renders `TypedDict` classes
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonRenderer;

impl LanguageRenderer for PythonRenderer {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::Python
    }

    fn preamble(&self) -> Option<&'static str> {
        Some("from typing import TypedDict")
    }

    fn type_name(&self, key: &str) -> String {
        python_class_name(key)
    }

    fn primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "str",
            // Never narrowed to int
            Primitive::Number { .. } => "float",
            Primitive::Boolean => "bool",
            Primitive::Null => "None",
        }
    }

    fn array_of(&self, element: &str) -> String {
        format!("list[{element}]")
    }

    fn unknown_array(&self) -> &'static str {
        "list"
    }

    fn declaration(&self, name: &str, fields: &[RenderedField<'_>]) -> String {
        let mut out = format!("class {name}(TypedDict):");
        if fields.is_empty() {
            out.push_str("\n    pass");
            return out;
        }

        for field in fields {
            let _ = write!(
                out,
                "\n    {}: {}",
                python_field_name(field.key),
                field.type_ref
            );
        }
        out
    }

    fn alias(&self, name: &str, type_ref: &str) -> String {
        format!("{name} = {type_ref}")
    }
}

// ============================================================================
// Java
// ============================================================================

/// Renders POJOs with private fields and public accessors
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaRenderer;

impl LanguageRenderer for JavaRenderer {
    fn language(&self) -> TargetLanguage {
        TargetLanguage::Java
    }

    fn preamble(&self) -> Option<&'static str> {
        Some("import java.util.List;")
    }

    fn type_name(&self, key: &str) -> String {
        java_class_name(key)
    }

    fn primitive(&self, primitive: Primitive) -> &'static str {
        match primitive {
            Primitive::String => "String",
            Primitive::Number { integral: true } => "Integer",
            Primitive::Number { integral: false } => "Double",
            Primitive::Boolean => "Boolean",
            Primitive::Null => "Object",
        }
    }

    fn array_of(&self, element: &str) -> String {
        format!("List<{element}>")
    }

    fn unknown_array(&self) -> &'static str {
        "List<Object>"
    }

    fn declaration(&self, name: &str, fields: &[RenderedField<'_>]) -> String {
        let mut out = format!("public class {name} {{\n");

        let members: Vec<(String, &str)> = fields
            .iter()
            .map(|f| (java_field_name(f.key), f.type_ref.as_str()))
            .collect();

        for (field, ty) in &members {
            let _ = writeln!(out, "    private {ty} {field};");
        }

        for (field, ty) in &members {
            let suffix = java_accessor_suffix(field);
            out.push('\n');
            let _ = writeln!(out, "    public {ty} get{suffix}() {{");
            let _ = writeln!(out, "        return {field};");
            out.push_str("    }\n\n");
            let _ = writeln!(out, "    public void set{suffix}({ty} {field}) {{");
            let _ = writeln!(out, "        this.{field} = {field};");
            out.push_str("    }\n");
        }

        out.push('}');
        out
    }

    fn alias(&self, name: &str, type_ref: &str) -> String {
        // Java has no type aliases; wrap the value instead
        self.declaration(
            name,
            &[RenderedField {
                key: "value",
                type_ref: type_ref.to_string(),
            }],
        )
    }
}

/// Renderer for a language
pub fn renderer_for(language: TargetLanguage) -> &'static dyn LanguageRenderer {
    match language {
        TargetLanguage::TypeScript => &TypeScriptRenderer,
        TargetLanguage::Python => &PythonRenderer,
        TargetLanguage::Java => &JavaRenderer,
    }
}
