use indexmap::IndexMap;
use smol_str::SmolStr;

use super::element::ElementId;
use crate::base::QualifiedName;

/// Unique identifier for an attached marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u32);

impl MarkerId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The value of a marker field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerValue {
    String(SmolStr),
    Strings(Vec<SmolStr>),
}

impl MarkerValue {
    /// View the value as a list. A single string reads as a one-element list.
    pub fn as_strings(&self) -> &[SmolStr] {
        match self {
            MarkerValue::String(value) => std::slice::from_ref(value),
            MarkerValue::Strings(values) => values,
        }
    }
}

impl From<&str> for MarkerValue {
    fn from(value: &str) -> Self {
        MarkerValue::String(value.into())
    }
}

impl<S: Into<SmolStr>> From<Vec<S>> for MarkerValue {
    fn from(values: Vec<S>) -> Self {
        MarkerValue::Strings(values.into_iter().map(Into::into).collect())
    }
}

/// A marker declaration before it is attached to an element.
///
/// ```ignore
/// let marker = Marker::new(kind).with_field("value", vec!["com.x.Foo", "com.y"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    kind: QualifiedName,
    fields: IndexMap<SmolStr, MarkerValue>,
}

impl Marker {
    pub fn new(kind: QualifiedName) -> Self {
        Self {
            kind,
            fields: IndexMap::new(),
        }
    }

    /// Set a field, replacing any previous value.
    pub fn with_field(mut self, name: impl Into<SmolStr>, value: impl Into<MarkerValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn kind(&self) -> &QualifiedName {
        &self.kind
    }

    pub fn field(&self, name: &str) -> Option<&MarkerValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&SmolStr, &MarkerValue)> {
        self.fields.iter()
    }
}

/// A marker attached to an element of the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerInstance {
    pub id: MarkerId,
    /// The element the marker is attached to.
    pub owner: ElementId,
    pub marker: Marker,
}

impl MarkerInstance {
    pub fn kind(&self) -> &QualifiedName {
        self.marker.kind()
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.marker.kind() == kind
    }

    /// String values of a field; empty when the field is absent.
    pub fn strings(&self, field: &str) -> &[SmolStr] {
        self.marker
            .field(field)
            .map(MarkerValue::as_strings)
            .unwrap_or_default()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.marker.field(field).is_some()
    }
}
