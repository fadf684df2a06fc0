//! Foundation types for the generator.
//!
//! - [`QualifiedName`] - validated dot-separated names
//! - [`Position`], [`Span`] - source locations of anchor elements
//!
//! This module has NO dependencies on other crate modules except `error`.

mod name;
mod position;

pub use name::{QualifiedName, SEPARATOR, is_identifier};
pub use position::{Position, Span};
