//! Diagnostics: notes and warnings tied to program elements.
//!
//! Every diagnostic can point at the element a marker sits on, the marker
//! instance itself and one of its fields, so host tooling can underline the
//! exact reference that caused it.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::Span;
use crate::model::{ElementId, MarkerId, SymbolCatalog};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Note,
    Warning,
    /// A warning the host must not suppress.
    MandatoryWarning,
    Error,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::MandatoryWarning => "mandatory warning",
            Severity::Error => "error",
        }
    }
}

/// A diagnostic message with its anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Diagnostic code (e.g., "W0001").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
    /// The element the diagnostic is reported on.
    pub element: Option<ElementId>,
    /// The marker instance on that element that caused it.
    pub marker: Option<MarkerId>,
    /// The field of that marker.
    pub field: Option<SmolStr>,
    /// Source location of the element, when the model knows it.
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            element: None,
            marker: None,
            field: None,
            span: None,
        }
    }

    /// Create a new note.
    pub fn note(message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Note, message)
    }

    /// Create a new mandatory warning.
    pub fn mandatory_warning(message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::MandatoryWarning, message)
    }

    pub fn at_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    pub fn on_marker(mut self, marker: MarkerId) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn on_field(mut self, field: impl Into<SmolStr>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes emitted by the generator.
///
/// - **N0001-N0099**: Notes
/// - **W0001-W0099**: Warnings
pub mod codes {
    /// Start of a generation pass.
    pub const PASS_STARTED: &str = "N0001";
    /// Type skipped because this generator already produced it.
    pub const ALREADY_GENERATED: &str = "N0002";

    /// Reference matches neither a type nor a namespace.
    pub const UNRESOLVED_REFERENCE: &str = "W0001";
}

// ============================================================================
// SINKS
// ============================================================================

/// The host's diagnostic output.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in memory.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn with_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    pub fn with_code(&self, code: &str) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.code.as_deref() == Some(code))
            .collect()
    }

    pub fn note_count(&self) -> usize {
        self.count(Severity::Note)
    }

    /// Number of warnings of either kind.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning) + self.count(Severity::MandatoryWarning)
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

impl DiagnosticSink for DiagnosticCollector {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

// ============================================================================
// REPORTER
// ============================================================================

/// Uniform emission of diagnostics into a sink.
///
/// Fills in the anchor's span from the catalog and mirrors every diagnostic
/// as a `tracing` event.
pub struct Reporter<'a> {
    sink: &'a mut dyn DiagnosticSink,
    catalog: &'a dyn SymbolCatalog,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a mut dyn DiagnosticSink, catalog: &'a dyn SymbolCatalog) -> Self {
        Self { sink, catalog }
    }

    /// Report a diagnostic built from its parts.
    pub fn report(
        &mut self,
        severity: Severity,
        message: impl Into<Arc<str>>,
        element: Option<ElementId>,
        marker: Option<MarkerId>,
        field: Option<&str>,
    ) {
        let mut diagnostic = Diagnostic::new(severity, message);
        diagnostic.element = element;
        diagnostic.marker = marker;
        diagnostic.field = field.map(SmolStr::from);
        self.emit(diagnostic);
    }

    pub fn emit(&mut self, mut diagnostic: Diagnostic) {
        if diagnostic.span.is_none() {
            diagnostic.span = diagnostic
                .element
                .and_then(|id| self.catalog.element(id))
                .and_then(|e| e.span);
        }

        let code = diagnostic.code.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Note => tracing::info!(code, "{}", diagnostic.message),
            Severity::Warning | Severity::MandatoryWarning => {
                tracing::warn!(code, "{}", diagnostic.message)
            }
            Severity::Error => tracing::error!(code, "{}", diagnostic.message),
        }

        self.sink.report(diagnostic);
    }
}
