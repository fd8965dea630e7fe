//! Structural type inference module
//!
//! Derives a language-agnostic [`TypeDescriptor`] tree from an arbitrary JSON
//! value. The tree drives every per-language renderer in [`crate::codegen`].
//!
//! # Rules
//!
//! - **Scalars**: strings, numbers (integral or not), booleans and null map to
//!   [`Primitive`] kinds
//! - **Arrays**: the element type comes from the first element only; an empty
//!   array has an unknown element
//! - **Objects**: become a [`NamedComposite`] named after the key that held them
//! - **Depth**: nesting deeper than the configured maximum is an error rather
//!   than unbounded recursion

mod inference;
mod types;

pub use inference::{infer_descriptor, infer_wrapped, TypeInferrer, DEFAULT_MAX_DEPTH, ROOT_NAME};
pub use types::{FieldDescriptor, NamedComposite, Primitive, RootDescriptor, TypeDescriptor};
