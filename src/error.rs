//! Error types for the fallible edges of the generator.
//!
//! Resolution problems are never errors: an unknown reference is a warning
//! diagnostic and a self-generated type is a note. The types here cover
//! building a model, validating configuration and the renderer failing.

use smol_str::SmolStr;
use thiserror::Error;

use crate::model::ElementId;

/// A string that is not a valid dot-separated qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// The name was empty.
    #[error("qualified name is empty")]
    Empty,

    /// One of the dot-separated segments is not an identifier.
    #[error("invalid segment '{segment}' in qualified name '{name}'")]
    InvalidSegment { name: SmolStr, segment: SmolStr },
}

/// Errors raised while building a [`SymbolModel`](crate::model::SymbolModel).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A name passed to the model does not parse.
    #[error(transparent)]
    InvalidName(#[from] NameError),

    /// No element with this id exists in the model.
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// A type with the same qualified name is already declared.
    #[error("duplicate type declaration: '{0}'")]
    DuplicateType(SmolStr),

    /// Types and members may only be declared inside namespaces or types.
    #[error("'{enclosing}' cannot enclose a {what}")]
    InvalidEnclosing {
        enclosing: SmolStr,
        what: &'static str,
    },
}

/// Errors raised by [`GeneratorConfig::validate`](crate::config::GeneratorConfig::validate).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The generator identity must not be blank.
    #[error("generator identity is empty")]
    EmptyIdentity,

    /// A configured marker kind is not a qualified name.
    #[error("invalid {role} marker kind: {source}")]
    InvalidMarkerKind {
        role: &'static str,
        #[source]
        source: NameError,
    },

    /// A configured marker field name is blank.
    #[error("{0} field name is empty")]
    EmptyFieldName(&'static str),

    /// The configuration document could not be parsed.
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors reported by a [`Renderer`](crate::render::Renderer).
#[derive(Debug, Error)]
pub enum RenderError {
    /// IO error while writing the artifact.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The renderer could not produce an artifact for the target.
    #[error("cannot render matcher for '{target}': {message}")]
    Failed { target: SmolStr, message: String },
}

impl RenderError {
    /// Create a rendering failure for a target type.
    pub fn failed(target: impl Into<SmolStr>, message: impl Into<String>) -> Self {
        Self::Failed {
            target: target.into(),
            message: message.into(),
        }
    }
}

/// Errors propagated to the host from a generation round.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The renderer failed for a target; the round stops at that target.
    #[error("matcher generation failed for '{target}'")]
    Render {
        target: SmolStr,
        #[source]
        source: RenderError,
    },

    /// The catalog handed out an id it cannot look up.
    #[error("symbol catalog has no element {0:?}")]
    UnknownElement(ElementId),
}
