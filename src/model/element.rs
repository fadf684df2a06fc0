use smol_str::SmolStr;

use super::marker::MarkerId;
use crate::base::{QualifiedName, Span};

/// Unique identifier for an element in the model arena.
/// Uses u32 for compact storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl ElementId {
    /// Create a new ElementId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The flavour of a type declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

/// What an element is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A named grouping of type declarations (a package).
    Namespace,
    /// A type declaration, possibly nested in another type.
    Type(TypeKind),
    /// Anything else a marker may sit on: methods, fields, parameters.
    Member,
}

impl ElementKind {
    pub fn is_type(&self) -> bool {
        matches!(self, ElementKind::Type(_))
    }

    pub fn type_kind(&self) -> Option<TypeKind> {
        match self {
            ElementKind::Type(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// A program element in the host's symbol model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    /// The simple (last segment) name.
    pub name: SmolStr,
    pub qualified_name: QualifiedName,
    pub kind: ElementKind,
    /// The element this one is declared in. `None` for namespaces.
    pub enclosing: Option<ElementId>,
    /// Directly enclosed elements, in declaration order.
    pub enclosed: Vec<ElementId>,
    /// Markers attached to this element, in declaration order.
    pub markers: Vec<MarkerId>,
    pub span: Option<Span>,
}

impl Element {
    pub fn is_type(&self) -> bool {
        self.kind.is_type()
    }
}
