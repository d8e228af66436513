//! Error types for the project model
//!
//! Provides error handling for:
//! - Invariant violations when building file contents
//! - Contents tree construction (paths, file/directory conflicts)
//! - Decoding persisted documents

use crate::path::PathError;

/// Errors raised while building or reshaping model values
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A parsed-ahead text file without a successful parse
    #[error("revisions state PARSED_AHEAD requires a PARSE_SUCCESS parse result")]
    ParsedAheadWithoutSuccess,

    /// Invalid path key in project contents
    #[error("invalid project path: {0}")]
    InvalidPath(#[from] PathError),

    /// The root cannot hold an entry
    #[error("project contents cannot hold an entry at the root path")]
    RootEntry,

    /// A path is used both as a file and as a directory
    #[error("path conflict at {path}: a file cannot contain other entries")]
    PathConflict {
        /// Offending path
        path: String,
    },
}

/// Errors raised while decoding or encoding a persisted document
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Input text is not JSON
    #[error("persisted document is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// Document root is not a JSON object
    #[error("persisted document must be a JSON object")]
    NotAnObject,

    /// `projectVersion` is neither null nor a non-negative integer
    #[error("invalid projectVersion: {0}")]
    InvalidVersion(serde_json::Value),

    /// `projectVersion` is newer than anything this build understands
    #[error("unsupported projectVersion {0}")]
    UnsupportedVersion(u64),

    /// Document body does not match the shape of its declared version
    #[error("document does not match version {version} shape: {source}")]
    Shape {
        /// Declared version
        version: u32,
        /// Underlying serde failure
        #[source]
        source: serde_json::Error,
    },

    /// Encoding to JSON failed
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
