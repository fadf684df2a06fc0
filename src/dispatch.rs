//! Generation dispatch: one end-to-end pass per host round.
//!
//! The host drives a finite sequence of rounds. The dispatcher is an explicit
//! two-state machine:
//!
//! ```text
//!            round (not over)
//!          ┌────────────────┐
//!          ▼                │
//!       ACTIVE ─────────────┘
//!          │
//!          │ round reports "processing over"
//!          ▼
//!      FINISHED   (every later call is a no-op returning false)
//! ```
//!
//! Per active round: note the start of the pass, check whether the round
//! considers the configuration marker kind at all, then for every configured
//! element resolve → guard → render.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, Reporter, codes};
use crate::error::{ConfigError, GenerationError};
use crate::guard::IdempotencyGuard;
use crate::model::{ElementId, SymbolCatalog, SymbolModel};
use crate::render::{GenerationRequest, Renderer, TimeProvider};
use crate::resolve::ReferenceResolver;

// ============================================================================
// ROUNDS
// ============================================================================

/// What the host tells the generator about the current round.
pub trait RoundEnvironment {
    /// `true` once the host will issue no further rounds.
    fn processing_over(&self) -> bool;

    /// Marker kinds under consideration in this round.
    fn marker_kinds(&self) -> Vec<SmolStr>;

    /// Elements of this round carrying a marker of `kind`.
    fn elements_marked_with(&self, kind: &str) -> Vec<ElementId>;

    fn considers(&self, kind: &str) -> bool {
        self.marker_kinds().iter().any(|k| k == kind)
    }
}

/// A concrete round: marker kind → marked elements, plus the "over" flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Round {
    marked: IndexMap<SmolStr, Vec<ElementId>>,
    over: bool,
}

impl Round {
    pub fn new() -> Self {
        Self::default()
    }

    /// The final round: the host has stopped issuing rounds.
    pub fn over() -> Self {
        Self {
            marked: IndexMap::new(),
            over: true,
        }
    }

    /// A round over every marked element of a model.
    pub fn from_model(model: &SymbolModel) -> Self {
        let mut marked: IndexMap<SmolStr, Vec<ElementId>> = IndexMap::new();
        for marker in model.iter_markers() {
            let elements = marked.entry(marker.kind().as_str().into()).or_default();
            if !elements.contains(&marker.owner) {
                elements.push(marker.owner);
            }
        }
        Self {
            marked,
            over: false,
        }
    }

    /// Add a marked element to the round.
    pub fn with_element(mut self, kind: impl Into<SmolStr>, element: ElementId) -> Self {
        let elements = self.marked.entry(kind.into()).or_default();
        if !elements.contains(&element) {
            elements.push(element);
        }
        self
    }
}

impl RoundEnvironment for Round {
    fn processing_over(&self) -> bool {
        self.over
    }

    fn marker_kinds(&self) -> Vec<SmolStr> {
        self.marked.keys().cloned().collect()
    }

    fn elements_marked_with(&self, kind: &str) -> Vec<ElementId> {
        self.marked.get(kind).cloned().unwrap_or_default()
    }
}

// ============================================================================
// DISPATCHER
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessorState {
    Active,
    Finished,
}

/// What happened in one round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Whether the round contained configuration markers for this generator.
    pub participated: bool,
    /// Types handed to the renderer, in order.
    pub generated: Vec<ElementId>,
    /// Types skipped because this generator already produced them.
    pub skipped: Vec<ElementId>,
    /// References that matched nothing.
    pub unresolved: Vec<SmolStr>,
}

impl RoundOutcome {
    fn not_participating() -> Self {
        Self::default()
    }
}

/// Orchestrates matcher generation across host rounds.
pub struct GenerationDispatcher<R> {
    config: GeneratorConfig,
    renderer: R,
    time_provider: TimeProvider,
    state: ProcessorState,
}

impl<R: Renderer> GenerationDispatcher<R> {
    /// Create a dispatcher using the system clock.
    pub fn new(config: GeneratorConfig, renderer: R) -> Result<Self, ConfigError> {
        Self::with_time_provider(config, renderer, TimeProvider::system())
    }

    pub fn with_time_provider(
        config: GeneratorConfig,
        renderer: R,
        time_provider: TimeProvider,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            renderer,
            time_provider,
            state: ProcessorState::Active,
        })
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Marker kinds this generator handles, for host routing.
    pub fn supported_marker_kinds(&self) -> Vec<SmolStr> {
        vec![self.config.configuration_marker.clone()]
    }

    /// Run one round. Returns whether the generator participated.
    pub fn process(
        &mut self,
        round: &dyn RoundEnvironment,
        catalog: &dyn SymbolCatalog,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<bool, GenerationError> {
        self.process_round(round, catalog, sink)
            .map(|outcome| outcome.participated)
    }

    /// Run one round and report what happened.
    pub fn process_round(
        &mut self,
        round: &dyn RoundEnvironment,
        catalog: &dyn SymbolCatalog,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<RoundOutcome, GenerationError> {
        if self.state == ProcessorState::Finished {
            return Ok(RoundOutcome::not_participating());
        }
        if round.processing_over() {
            tracing::info!("processing over, matcher generation finished");
            self.state = ProcessorState::Finished;
            return Ok(RoundOutcome::not_participating());
        }

        let mut reporter = Reporter::new(sink, catalog);
        reporter.emit(
            Diagnostic::note("Annotation processor for hamcrest matcher generation started")
                .with_code(codes::PASS_STARTED),
        );

        let kind = self.config.configuration_marker.clone();
        if !round.considers(&kind) {
            tracing::debug!(kind = kind.as_str(), "configuration marker not in round");
            return Ok(RoundOutcome::not_participating());
        }

        let mut outcome = RoundOutcome {
            participated: true,
            ..RoundOutcome::default()
        };
        for anchor in round.elements_marked_with(&kind) {
            self.generate_for(anchor, catalog, &mut reporter, &mut outcome)?;
        }

        tracing::info!(
            generated = outcome.generated.len(),
            skipped = outcome.skipped.len(),
            unresolved = outcome.unresolved.len(),
            "matcher generation round complete"
        );
        Ok(outcome)
    }

    /// Handle every configuration marker on one anchor.
    ///
    /// A type named by several markers of the same anchor is handled once, with
    /// the first marker that named it.
    fn generate_for(
        &mut self,
        anchor: ElementId,
        catalog: &dyn SymbolCatalog,
        reporter: &mut Reporter<'_>,
        outcome: &mut RoundOutcome,
    ) -> Result<(), GenerationError> {
        let resolver = ReferenceResolver::new(catalog, &self.config);
        let guard = IdempotencyGuard::new(catalog, &self.config);
        let anchors = [anchor];
        let mut handled: FxHashSet<ElementId> = FxHashSet::default();

        for marker in catalog.markers_on(anchor, &self.config.configuration_marker) {
            let resolved = resolver.resolve(anchor, marker, reporter);
            outcome.unresolved.extend(resolved.unresolved);

            for ty in resolved.types {
                if !handled.insert(ty) {
                    continue;
                }
                if !guard.check(ty, reporter) {
                    outcome.skipped.push(ty);
                    continue;
                }
                let target = catalog
                    .element(ty)
                    .ok_or(GenerationError::UnknownElement(ty))?;

                tracing::debug!(target_type = %target.qualified_name, "generating matcher");
                let request = GenerationRequest {
                    target,
                    time_provider: &self.time_provider,
                    generator_identity: &self.config.generator_identity,
                    anchors: &anchors,
                    marker,
                };
                self.renderer
                    .generate(&request)
                    .map_err(|source| GenerationError::Render {
                        target: target.qualified_name.as_str().into(),
                        source,
                    })?;
                outcome.generated.push(ty);
            }
        }
        Ok(())
    }
}
