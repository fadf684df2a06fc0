//! # matchergen-base
//!
//! Resolution-and-generation engine for matcher code generation.
//!
//! Configuration markers on program elements name types or namespaces. For
//! every top-level type they resolve to, a matcher is rendered, unless the
//! type was itself produced by this generator in an earlier round.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! dispatch     → Round state machine: resolve → guard → render
//!   ↓
//! resolve      → Reference strings → top-level types
//! guard        → Skip self-generated types
//! render       → Renderer interface, time provider
//!   ↓
//! diagnostics  → Notes and warnings tied to elements and markers
//! config       → Generator identity and marker kinds
//!   ↓
//! model        → Symbol catalog (host view + in-memory model)
//!   ↓
//! base         → QualifiedName, Span/Position
//! ```

// ============================================================================
// MODULES (dependency order: base → model → diagnostics/config → ... → dispatch)
// ============================================================================

/// Foundation types: QualifiedName, Span, Position
pub mod base;

/// Error types for the fallible edges
pub mod error;

/// Symbol model: elements, markers, the catalog trait
pub mod model;

/// Diagnostics: severity, sinks, reporter
pub mod diagnostics;

/// Generator configuration
pub mod config;

/// Reference resolution
pub mod resolve;

/// Idempotency guard
pub mod guard;

/// Renderer interface
pub mod render;

/// Round-based generation dispatch
pub mod dispatch;

// Re-export commonly needed items
pub use base::{QualifiedName, Span};
pub use config::GeneratorConfig;
pub use diagnostics::{Diagnostic, DiagnosticCollector, DiagnosticSink, Severity};
pub use dispatch::{GenerationDispatcher, ProcessorState, Round, RoundEnvironment, RoundOutcome};
pub use error::{ConfigError, GenerationError, ModelError, NameError, RenderError};
pub use model::{ElementId, MarkerId, SymbolCatalog, SymbolModel};
pub use render::{GenerationRequest, Renderer, TimeProvider};
