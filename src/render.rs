//! The renderer interface: the collaborator that writes matcher sources.
//!
//! The generator decides *which* types get a matcher; a [`Renderer`] decides
//! what the matcher looks like and where it is written. Renderers are expected
//! to tag their output with a generation marker carrying
//! [`GenerationRequest::generator_identity`], so the next round recognizes it.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::error::RenderError;
use crate::model::{Element, ElementId, MarkerInstance};

/// Source of the timestamp recorded in generated artifacts.
#[derive(Clone)]
pub struct TimeProvider(Arc<dyn Fn() -> NaiveDateTime + Send + Sync>);

impl TimeProvider {
    pub fn new(f: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// The local wall clock.
    pub fn system() -> Self {
        Self::new(|| chrono::Local::now().naive_local())
    }

    /// Always the same instant; useful for reproducible output.
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self::new(move || at)
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.0)()
    }
}

impl Default for TimeProvider {
    fn default() -> Self {
        Self::system()
    }
}

impl fmt::Debug for TimeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimeProvider").finish_non_exhaustive()
    }
}

/// Everything a renderer gets for one eligible type.
#[derive(Debug)]
pub struct GenerationRequest<'a> {
    /// The top-level type to generate a matcher for.
    pub target: &'a Element,
    pub time_provider: &'a TimeProvider,
    pub generator_identity: &'a str,
    /// The elements whose configuration led to this request.
    pub anchors: &'a [ElementId],
    /// The configuration marker instance that referenced the target.
    pub marker: &'a MarkerInstance,
}

/// Produces one artifact per eligible type.
pub trait Renderer {
    fn generate(&mut self, request: &GenerationRequest<'_>) -> Result<(), RenderError>;
}

impl<F> Renderer for F
where
    F: FnMut(&GenerationRequest<'_>) -> Result<(), RenderError>,
{
    fn generate(&mut self, request: &GenerationRequest<'_>) -> Result<(), RenderError> {
        self(request)
    }
}
