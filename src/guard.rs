//! Idempotency guard: skip types this generator produced in an earlier round.
//!
//! Generated matchers carry a generation marker naming their generator. When
//! a later round re-scans the output, those types must not be fed back into
//! the renderer. The check is a pure read of the type's markers; nothing is
//! cached between rounds.

use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, Reporter, codes};
use crate::model::{ElementId, MarkerId, SymbolCatalog};

/// Whether a resolved type may be handed to the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// Produced by this generator; carries the generation markers that say so.
    SelfGenerated { markers: Vec<MarkerId> },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

pub struct IdempotencyGuard<'a> {
    catalog: &'a dyn SymbolCatalog,
    config: &'a GeneratorConfig,
}

impl<'a> IdempotencyGuard<'a> {
    pub fn new(catalog: &'a dyn SymbolCatalog, config: &'a GeneratorConfig) -> Self {
        Self { catalog, config }
    }

    /// Classify a type without reporting anything.
    ///
    /// A type is self-generated when any of its generation markers lists this
    /// generator's identity among its identity values.
    pub fn classify(&self, ty: ElementId) -> Eligibility {
        let identity = self.config.generator_identity.as_str();
        let markers: Vec<MarkerId> = self
            .catalog
            .markers_on(ty, &self.config.generation_marker)
            .into_iter()
            .filter(|m| {
                m.strings(&self.config.identity_field)
                    .iter()
                    .any(|value| value == identity)
            })
            .map(|m| m.id)
            .collect();

        if markers.is_empty() {
            Eligibility::Eligible
        } else {
            Eligibility::SelfGenerated { markers }
        }
    }

    /// Classify a type and report a note when it is skipped.
    ///
    /// Returns `true` when the type is eligible for generation.
    pub fn check(&self, ty: ElementId, reporter: &mut Reporter<'_>) -> bool {
        let markers = match self.classify(ty) {
            Eligibility::Eligible => return true,
            Eligibility::SelfGenerated { markers } => markers,
        };

        let name = self
            .catalog
            .element(ty)
            .map(|e| e.qualified_name.to_string())
            .unwrap_or_else(|| format!("{ty:?}"));
        tracing::debug!(target_type = %name, "skipping self-generated type");

        let message = format!(
            "Generation skipped for: '{name}' because it is already generated by this processor"
        );
        for marker in markers {
            reporter.emit(
                Diagnostic::note(message.as_str())
                    .with_code(codes::ALREADY_GENERATED)
                    .at_element(ty)
                    .on_marker(marker)
                    .on_field(self.config.identity_field.clone()),
            );
        }
        false
    }
}
