//! Symbol model: the read-only view of the host's program elements.
//!
//! The host toolchain owns the type and namespace catalog for the duration of
//! one invocation. The generator only ever queries it through
//! [`SymbolCatalog`]; [`SymbolModel`] is an in-memory implementation for hosts
//! that assemble the catalog up front.
//!
//! ## Key Types
//!
//! - [`Element`]: a namespace, type declaration or member
//! - [`Marker`] / [`MarkerInstance`]: declarative attachments on elements
//! - [`SymbolCatalog`]: qualified name lookup, nesting walk, marker queries
//! - [`SymbolModel`]: arena-backed catalog with a builder API

mod catalog;
mod element;
mod marker;

pub use catalog::{NameMatch, SymbolCatalog, SymbolModel};
pub use element::{Element, ElementId, ElementKind, TypeKind};
pub use marker::{Marker, MarkerId, MarkerInstance, MarkerValue};
