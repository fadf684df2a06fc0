//! The query surface over the host's symbol model, and an in-memory model
//! that implements it.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::element::{Element, ElementId, ElementKind, TypeKind};
use super::marker::{Marker, MarkerId, MarkerInstance};
use crate::base::{QualifiedName, Span};
use crate::error::ModelError;

/// What a qualified name matched in the catalog.
///
/// A name can be both a namespace and a type; both halves are kept.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameMatch {
    /// Every namespace declared under the name, even an empty one.
    pub namespaces: Vec<ElementId>,
    /// Elements enclosed by those namespaces.
    pub namespace_members: Vec<ElementId>,
    /// The type declared under the name, if any.
    pub ty: Option<ElementId>,
}

impl NameMatch {
    /// `true` when the name is neither a namespace nor a type.
    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty() && self.ty.is_none()
    }
}

/// Read-only view over the host's type and namespace catalog.
///
/// Lookups fail softly: an unknown name or id yields an empty result, never
/// an error. Reporting absence is the caller's job.
pub trait SymbolCatalog {
    fn element(&self, id: ElementId) -> Option<&Element>;

    fn marker(&self, id: MarkerId) -> Option<&MarkerInstance>;

    /// The type declared under exactly this qualified name.
    fn type_named(&self, qualified_name: &str) -> Option<ElementId>;

    /// Every namespace declared under this qualified name.
    fn namespaces_named(&self, qualified_name: &str) -> Vec<ElementId>;

    /// Every element carrying at least one marker of `kind`, in model order.
    fn elements_marked_with(&self, kind: &str) -> Vec<ElementId>;

    /// Resolve a name to the matching type and the members of matching
    /// namespaces.
    fn resolve_qualified_name(&self, qualified_name: &str) -> NameMatch {
        let namespaces = self.namespaces_named(qualified_name);
        let namespace_members = namespaces
            .iter()
            .filter_map(|&ns| self.element(ns))
            .flat_map(|ns| ns.enclosed.iter().copied())
            .collect();
        NameMatch {
            namespaces,
            namespace_members,
            ty: self.type_named(qualified_name),
        }
    }

    /// Walk the nesting chain up to the top-level type.
    ///
    /// Returns `id` itself when it is not nested in another type.
    fn outermost_enclosing(&self, id: ElementId) -> ElementId {
        let mut current = id;
        while let Some(parent) = self
            .element(current)
            .and_then(|e| e.enclosing)
            .filter(|&p| self.is_type(p))
        {
            current = parent;
        }
        current
    }

    /// Markers of `kind` on an element, in declaration order.
    fn markers_on(&self, id: ElementId, kind: &str) -> Vec<&MarkerInstance> {
        self.element(id)
            .map(|e| {
                e.markers
                    .iter()
                    .filter_map(|&m| self.marker(m))
                    .filter(|m| m.is_kind(kind))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_type(&self, id: ElementId) -> bool {
        self.element(id).is_some_and(Element::is_type)
    }
}

// ============================================================================
// IN-MEMORY MODEL
// ============================================================================

/// An arena-backed symbol model built up front by the host.
///
/// Elements and markers are stored in vectors and referenced by index from
/// the lookup maps.
#[derive(Clone, Debug, Default)]
pub struct SymbolModel {
    elements: Vec<Element>,
    markers: Vec<MarkerInstance>,
    /// Type qualified name -> element (IndexMap preserves insertion order).
    types_by_name: IndexMap<SmolStr, ElementId>,
    /// Namespace qualified name -> every declaration of it.
    namespaces_by_name: IndexMap<SmolStr, Vec<ElementId>>,
}

impl SymbolModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a namespace.
    ///
    /// The same name may be declared more than once (a namespace split across
    /// modules); lookups return every declaration.
    pub fn add_namespace(&mut self, name: &str) -> Result<ElementId, ModelError> {
        let qualified_name = QualifiedName::parse(name)?;
        let id = self.push(Element {
            id: ElementId::new(self.elements.len()),
            name: qualified_name.simple_name().into(),
            qualified_name,
            kind: ElementKind::Namespace,
            enclosing: None,
            enclosed: Vec::new(),
            markers: Vec::new(),
            span: None,
        });
        self.namespaces_by_name
            .entry(name.into())
            .or_default()
            .push(id);
        Ok(id)
    }

    /// Declare a type inside a namespace or another type.
    pub fn add_type(
        &mut self,
        enclosing: ElementId,
        simple_name: &str,
        kind: TypeKind,
    ) -> Result<ElementId, ModelError> {
        let parent = self.get(enclosing)?;
        if parent.kind == ElementKind::Member {
            return Err(ModelError::InvalidEnclosing {
                enclosing: parent.qualified_name.clone().into(),
                what: "type",
            });
        }
        let qualified_name = parent.qualified_name.child(simple_name)?;
        if self.types_by_name.contains_key(qualified_name.as_str()) {
            return Err(ModelError::DuplicateType(qualified_name.into()));
        }

        let key = SmolStr::from(qualified_name.as_str());
        let id = self.declare(enclosing, qualified_name, ElementKind::Type(kind));
        self.types_by_name.insert(key, id);
        Ok(id)
    }

    /// Declare a non-type member (method, field, ...) inside a type.
    pub fn add_member(
        &mut self,
        enclosing: ElementId,
        simple_name: &str,
    ) -> Result<ElementId, ModelError> {
        let parent = self.get(enclosing)?;
        if !parent.is_type() {
            return Err(ModelError::InvalidEnclosing {
                enclosing: parent.qualified_name.clone().into(),
                what: "member",
            });
        }
        let qualified_name = parent.qualified_name.child(simple_name)?;
        Ok(self.declare(enclosing, qualified_name, ElementKind::Member))
    }

    /// Attach a marker to an element.
    pub fn attach_marker(
        &mut self,
        element: ElementId,
        marker: Marker,
    ) -> Result<MarkerId, ModelError> {
        self.get(element)?;
        let id = MarkerId::new(self.markers.len());
        self.markers.push(MarkerInstance {
            id,
            owner: element,
            marker,
        });
        self.elements[element.index()].markers.push(id);
        Ok(id)
    }

    /// Record where an element is declared.
    pub fn set_span(&mut self, element: ElementId, span: Span) -> Result<(), ModelError> {
        self.get(element)?;
        self.elements[element.index()].span = Some(span);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns an iterator over all attached markers in attachment order.
    pub fn iter_markers(&self) -> impl Iterator<Item = &MarkerInstance> {
        self.markers.iter()
    }

    fn get(&self, id: ElementId) -> Result<&Element, ModelError> {
        self.elements
            .get(id.index())
            .ok_or(ModelError::UnknownElement(id))
    }

    fn declare(
        &mut self,
        enclosing: ElementId,
        qualified_name: QualifiedName,
        kind: ElementKind,
    ) -> ElementId {
        let id = self.push(Element {
            id: ElementId::new(self.elements.len()),
            name: qualified_name.simple_name().into(),
            qualified_name,
            kind,
            enclosing: Some(enclosing),
            enclosed: Vec::new(),
            markers: Vec::new(),
            span: None,
        });
        self.elements[enclosing.index()].enclosed.push(id);
        id
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }
}

impl SymbolCatalog for SymbolModel {
    fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.index())
    }

    fn marker(&self, id: MarkerId) -> Option<&MarkerInstance> {
        self.markers.get(id.index())
    }

    fn type_named(&self, qualified_name: &str) -> Option<ElementId> {
        self.types_by_name.get(qualified_name).copied()
    }

    fn namespaces_named(&self, qualified_name: &str) -> Vec<ElementId> {
        self.namespaces_by_name
            .get(qualified_name)
            .cloned()
            .unwrap_or_default()
    }

    fn elements_marked_with(&self, kind: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| {
                e.markers
                    .iter()
                    .any(|&m| self.markers[m.index()].is_kind(kind))
            })
            .map(|e| e.id)
            .collect()
    }
}
