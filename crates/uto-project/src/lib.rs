//! Uto Project Model
//!
//! Typed, versioned project documents as persisted by the visual editor.
//!
//! # Core Concepts
//!
//! - [`VersionedDocument`]: A decoded document tagged with its schema version
//! - [`PersistentDocument<C>`]: Tabs, selection and contents, generic over the contents shape
//! - [`ProjectFile`] / [`LegacyFile`]: Current and pre-version-6 file entries
//! - [`ProjectContentsTree<F>`]: Hierarchical contents with structural sharing
//! - [`ProjectPath`]: Absolute addressing within the contents
//!
//! # Example
//!
//! ```rust,ignore
//! use uto_project::VersionedDocument;
//!
//! let document = VersionedDocument::from_json_str(&saved)?;
//! println!("saved at version {}", document.version());
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod document;
pub mod error;
pub mod file;
pub mod legacy;
pub mod path;
pub mod tree;

mod serde_util;

// Re-exports
pub use document::{
    CurrentContents, CurrentDocument, DocumentV0, EditorTab, FlatContents, LegacyContentsTree,
    PersistentDocument, VersionedDocument, CURRENT_PROJECT_VERSION, OPEN_FILE_TAB_TYPE,
    PROJECT_VERSION_KEY,
};
pub use error::{DecodeError, ModelError, ModelResult};
pub use file::{
    ParseFailure, ParseSuccess, ParsedTextFile, ProjectFile, RevisionsState, TextFile,
    TextFileContents, DIRECTORY_TYPE, TEXT_FILE_TYPE,
};
pub use legacy::{
    CanvasMetadata, CodeFile, Either, LegacyFile, LegacyParseResult, LegacyParseSuccess,
    UiJsFile, UiJsTag, CODE_FILE_TYPE, LEGACY_TEXT_FILE_TYPE, UI_JS_FILE_TYPE,
};
pub use path::{PathError, ProjectPath};
pub use tree::{
    contents_to_tree, contents_to_tree_lenient, default_directory_marker, fold_contents_tree,
    get_contents_tree, get_contents_tree_file, transform_contents_tree, tree_to_contents,
    try_map_tree_files, ContentEntry, ProjectContentTreeRoot, ProjectContentsTree, RejectedEntry,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
