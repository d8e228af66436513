//! Uto Templates
//!
//! Sample files and default contents for newly created projects.

#![warn(unreachable_pub)]

// Core modules
pub mod project;
pub mod samples;

// Re-exports
pub use project::{
    default_package_json, default_project_contents, new_project_document, APP_JS_PATH,
    INDEX_HTML_PATH, INDEX_JS_PATH, PACKAGE_JSON_PATH,
};
pub use samples::{
    current_time_ms, default_ui_js_file, preview_html, sample_preview_file,
    sample_preview_html_file, NoopParser, SourceParser, GENERATED_EXTERNAL_RESOURCES_LINKS_CLOSE,
    GENERATED_EXTERNAL_RESOURCES_LINKS_OPEN, SAMPLE_CODE, SAMPLE_CODE_FILENAME,
    SAMPLE_PREVIEW_CODE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
