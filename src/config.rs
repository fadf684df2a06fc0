//! Generator configuration

use smol_str::SmolStr;

use crate::base::QualifiedName;
use crate::error::ConfigError;
use crate::model::TypeKind;

/// Default identity recorded in the generation marker of produced matchers.
pub const DEFAULT_GENERATOR_IDENTITY: &str =
    "io.github.marmer.annotationprocessing.MatcherGenerationProcessor";
/// Default configuration marker kind.
pub const DEFAULT_CONFIGURATION_MARKER: &str =
    "io.github.marmer.annotationprocessing.MatcherConfiguration";
/// Default generation marker kind.
pub const DEFAULT_GENERATION_MARKER: &str = "javax.annotation.processing.Generated";

/// Settings for one generator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct GeneratorConfig {
    /// Identity written into, and looked for in, generation markers.
    pub generator_identity: SmolStr,
    /// Marker kind that names the types to generate matchers for.
    pub configuration_marker: SmolStr,
    /// Marker kind left on generated artifacts.
    pub generation_marker: SmolStr,
    /// Field of the configuration marker holding the references.
    pub reference_field: SmolStr,
    /// Field of the generation marker holding generator identities.
    pub identity_field: SmolStr,
    /// Type kinds dropped when a namespace is expanded.
    pub excluded_type_kinds: Vec<TypeKind>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator_identity: DEFAULT_GENERATOR_IDENTITY.into(),
            configuration_marker: DEFAULT_CONFIGURATION_MARKER.into(),
            generation_marker: DEFAULT_GENERATION_MARKER.into(),
            reference_field: "value".into(),
            identity_field: "value".into(),
            excluded_type_kinds: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    pub fn with_identity(mut self, identity: impl Into<SmolStr>) -> Self {
        self.generator_identity = identity.into();
        self
    }

    pub fn with_configuration_marker(mut self, kind: impl Into<SmolStr>) -> Self {
        self.configuration_marker = kind.into();
        self
    }

    pub fn with_generation_marker(mut self, kind: impl Into<SmolStr>) -> Self {
        self.generation_marker = kind.into();
        self
    }

    /// Drop namespace members of this kind during namespace expansion.
    pub fn excluding(mut self, kind: TypeKind) -> Self {
        if !self.excluded_type_kinds.contains(&kind) {
            self.excluded_type_kinds.push(kind);
        }
        self
    }

    pub fn is_excluded(&self, kind: TypeKind) -> bool {
        self.excluded_type_kinds.contains(&kind)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator_identity.trim().is_empty() {
            return Err(ConfigError::EmptyIdentity);
        }
        QualifiedName::parse(&self.configuration_marker).map_err(|source| {
            ConfigError::InvalidMarkerKind {
                role: "configuration",
                source,
            }
        })?;
        QualifiedName::parse(&self.generation_marker).map_err(|source| {
            ConfigError::InvalidMarkerKind {
                role: "generation",
                source,
            }
        })?;
        if self.reference_field.trim().is_empty() {
            return Err(ConfigError::EmptyFieldName("reference"));
        }
        if self.identity_field.trim().is_empty() {
            return Err(ConfigError::EmptyFieldName("identity"));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing keys take their default values.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
