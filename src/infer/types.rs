//! Type descriptor types

/// Scalar kind of a JSON leaf value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    /// A number; `integral` is set when the source value has no fractional part
    Number { integral: bool },
    Boolean,
    Null,
}

/// Shape of a JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    /// Array whose element shape was taken from its first element.
    /// `None` marks an empty array (unknown element).
    ArrayOf(Option<Box<TypeDescriptor>>),
    /// Object rendered as a named type declaration
    Named(NamedComposite),
}

impl TypeDescriptor {
    /// The named composite this descriptor refers to, looking through arrays
    pub fn named(&self) -> Option<&NamedComposite> {
        match self {
            TypeDescriptor::Named(composite) => Some(composite),
            TypeDescriptor::ArrayOf(Some(element)) => element.named(),
            TypeDescriptor::ArrayOf(None) | TypeDescriptor::Primitive(_) => None,
        }
    }
}

/// An object shape, named after the JSON key that held it
#[derive(Debug, Clone, PartialEq)]
pub struct NamedComposite {
    /// Raw JSON key; each renderer mangles it into its own identifier
    pub key: String,
    /// Fields in source key order
    pub fields: Vec<FieldDescriptor>,
}

impl NamedComposite {
    /// This composite followed by every nested composite, pre-order
    pub fn walk(&self) -> Vec<&NamedComposite> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a NamedComposite>) {
        out.push(self);
        for field in &self.fields {
            if let Some(nested) = field.descriptor.named() {
                nested.collect_into(out);
            }
        }
    }
}

/// One entry of an object shape
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Raw JSON key
    pub key: String,
    pub descriptor: TypeDescriptor,
}

/// Descriptor for a whole rendered value plus the key naming its root type
#[derive(Debug, Clone, PartialEq)]
pub struct RootDescriptor {
    /// Key the root type name is derived from
    pub name: String,
    pub descriptor: TypeDescriptor,
}

impl RootDescriptor {
    /// Whether the root renders as an alias instead of a type declaration
    pub fn is_alias(&self) -> bool {
        !matches!(self.descriptor, TypeDescriptor::Named(_))
    }

    /// Every composite declaration reachable from the root, pre-order
    pub fn composites(&self) -> Vec<&NamedComposite> {
        self.descriptor
            .named()
            .map(NamedComposite::walk)
            .unwrap_or_default()
    }
}
