//! Dot-separated qualified names (`com.example.Outer.Inner`).

use std::fmt;

use smol_str::SmolStr;

use crate::error::NameError;

/// Separator between qualified name segments.
pub const SEPARATOR: char = '.';

/// A validated, dot-separated qualified name.
///
/// Every segment is a Unicode identifier. The same form names namespaces,
/// types (including nested ones) and marker kinds.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct QualifiedName(SmolStr);

impl QualifiedName {
    /// Parse and validate a qualified name.
    pub fn parse(name: &str) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        if let Some(segment) = name.split(SEPARATOR).find(|s| !is_identifier(s)) {
            return Err(NameError::InvalidSegment {
                name: name.into(),
                segment: segment.into(),
            });
        }
        Ok(Self(name.into()))
    }

    /// Append a simple name, validating it.
    pub fn child(&self, simple_name: &str) -> Result<Self, NameError> {
        if !is_identifier(simple_name) {
            return Err(NameError::InvalidSegment {
                name: format!("{}{SEPARATOR}{simple_name}", self.0).into(),
                segment: simple_name.into(),
            });
        }
        Ok(Self(format!("{}{SEPARATOR}{simple_name}", self.0).into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR)
    }

    /// The last segment.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit(SEPARATOR).next().unwrap_or(self.0.as_str())
    }

    /// Everything before the last segment, if there is more than one.
    pub fn parent(&self) -> Option<QualifiedName> {
        self.0
            .rsplit_once(SEPARATOR)
            .map(|(parent, _)| Self(parent.into()))
    }
}

/// Whether `segment` is a single identifier (no separators, no keywords check).
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first == '_' || first == '$' || unicode_ident::is_xid_start(first) => {
            chars.all(|c| c == '$' || unicode_ident::is_xid_continue(c))
        }
        _ => false,
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for QualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for QualifiedName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for QualifiedName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for QualifiedName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for QualifiedName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<QualifiedName> for String {
    fn from(value: QualifiedName) -> Self {
        value.0.into()
    }
}

impl From<QualifiedName> for SmolStr {
    fn from(value: QualifiedName) -> Self {
        value.0
    }
}
