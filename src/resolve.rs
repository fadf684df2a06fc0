//! Reference resolution: expanding configured names into top-level types.
//!
//! A configuration marker lists qualified names. Each name may denote a
//! namespace (every type in it is taken), a type, or both. Nested types are
//! normalized to their outermost enclosing type, since a matcher is always
//! generated for a whole top-level declaration.
//!
//! ```text
//! ["com.x", "com.y.Outer.Inner", "com.x.A", "nope"]
//!     │
//!     ▼  dedup references (first-seen order)
//!     ▼  resolve_qualified_name + type filter
//!     ▼  outermost_enclosing
//!     ▼  dedup types (first-seen order)
//! [com.x.A, com.x.B, com.y.Outer]   + warning for "nope"
//! ```

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, Reporter, codes};
use crate::model::{ElementId, MarkerInstance, SymbolCatalog};

type OrderedSet<T> = IndexSet<T, FxBuildHasher>;

/// The result of resolving one configuration marker.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedReferences {
    /// Top-level types to attempt generation for, without duplicates.
    pub types: Vec<ElementId>,
    /// References that matched neither a type nor a namespace.
    pub unresolved: Vec<SmolStr>,
}

/// Resolves configuration markers against a symbol catalog.
pub struct ReferenceResolver<'a> {
    catalog: &'a dyn SymbolCatalog,
    config: &'a GeneratorConfig,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(catalog: &'a dyn SymbolCatalog, config: &'a GeneratorConfig) -> Self {
        Self { catalog, config }
    }

    /// Resolve every reference of a configuration marker.
    ///
    /// Unresolvable references are reported as mandatory warnings on `anchor`
    /// and do not stop the remaining references.
    pub fn resolve(
        &self,
        anchor: ElementId,
        marker: &MarkerInstance,
        reporter: &mut Reporter<'_>,
    ) -> ResolvedReferences {
        let field = self.config.reference_field.as_str();
        let references: OrderedSet<&SmolStr> = marker.strings(field).iter().collect();

        let mut types = OrderedSet::default();
        let mut unresolved = Vec::new();

        for reference in references {
            match self.resolve_reference(reference) {
                Some(found) => {
                    tracing::debug!(
                        reference = reference.as_str(),
                        count = found.len(),
                        "resolved matcher reference"
                    );
                    types.extend(found);
                }
                None => {
                    reporter.emit(
                        Diagnostic::mandatory_warning(format!(
                            "Neither a type nor a namespace exists for '{reference}'"
                        ))
                        .with_code(codes::UNRESOLVED_REFERENCE)
                        .at_element(anchor)
                        .on_marker(marker.id)
                        .on_field(field),
                    );
                    unresolved.push(reference.clone());
                }
            }
        }

        ResolvedReferences {
            types: types.into_iter().collect(),
            unresolved,
        }
    }

    /// Resolve a single reference to top-level types.
    ///
    /// Returns `None` when the name matches neither a type nor a namespace.
    /// A namespace whose members were all filtered out yields `Some` of an
    /// empty list.
    pub fn resolve_reference(&self, reference: &str) -> Option<Vec<ElementId>> {
        let found = self.catalog.resolve_qualified_name(reference);
        if found.is_empty() {
            return None;
        }

        let from_namespace = found.namespace_members.into_iter().filter(|&member| {
            let Some(kind) = self.catalog.element(member).and_then(|e| e.kind.type_kind()) else {
                return false;
            };
            if self.config.is_excluded(kind) {
                tracing::trace!(reference, ?member, ?kind, "excluded namespace member");
                return false;
            }
            true
        });

        let resolved: OrderedSet<ElementId> = from_namespace
            .chain(found.ty)
            .map(|ty| self.catalog.outermost_enclosing(ty))
            .collect();
        Some(resolved.into_iter().collect())
    }
}
