//! Error types for the migration pipeline
//!
//! Provides error handling for:
//! - Step failures (malformed build config, scene conversion, legacy files)
//! - Pipeline failures (decoding, a chain that did not reach the current version)
//! - Configuration loading

use uto_project::{DecodeError, ModelError};

use crate::scenes::SceneError;

/// Errors raised by a single migration step
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// `package.json` text is not JSON
    #[error("package.json is not valid JSON: {0}")]
    MalformedPackageJson(#[source] serde_json::Error),

    /// `package.json` has no `utopia` object
    #[error("package.json has an unexpected shape: {0}")]
    PackageJsonShape(String),

    /// Scene metadata could not be turned into a component
    #[error("scene conversion failed for {path}: {source}")]
    SceneConversion {
        /// File holding the scenes
        path: String,
        /// Converter failure
        #[source]
        source: SceneError,
    },

    /// A legacy file cannot be carried into the new shape
    #[error("cannot migrate {path}: {reason}")]
    LegacyFile {
        /// Offending file
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// Flat contents could not be arranged into a tree
    #[error("contents tree conversion failed: {0}")]
    ContentsTree(#[from] ModelError),

    /// Re-encoding a value failed
    #[error("encoding failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StepError {
    /// Create legacy file error for path
    pub fn legacy_file(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LegacyFile {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by the pipeline as a whole
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// A step failed; the document never advanced past `from_version`
    #[error("migration from version {from_version} failed: {source}")]
    Step {
        /// Version the failing step migrates from
        from_version: u32,
        /// Step failure
        #[source]
        source: StepError,
    },

    /// Input could not be decoded or output could not be encoded
    #[error("document codec error: {0}")]
    Codec(#[from] DecodeError),

    /// The chain ended below the current version
    #[error("migration chain stopped at version {version}")]
    Incomplete {
        /// Version reached
        version: u32,
    },
}

impl MigrationError {
    /// Version the document was at when the pipeline stopped, if a step failed
    #[inline]
    #[must_use]
    pub fn stopped_at_version(&self) -> Option<u32> {
        match self {
            Self::Step { from_version, .. } => Some(*from_version),
            Self::Incomplete { version } => Some(*version),
            Self::Codec(_) => None,
        }
    }
}

/// Errors while loading a [`crate::MigrationConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML syntax or type error
    #[error("invalid migration config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Semantically invalid value
    #[error("invalid migration config: {0}")]
    Invalid(String),
}

/// Result type alias for pipeline operations
pub type MigrationResult<T> = Result<T, MigrationError>;
