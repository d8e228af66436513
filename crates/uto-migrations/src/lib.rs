//! Uto Migrations
//!
//! Upgrades persisted project documents from any schema version to the current one.
//!
//! # Steps
//!
//! | From | To | Change |
//! |------|----|--------|
//! | 0 | 1 | Bare file names become tagged tabs |
//! | 1 | 2 | Scene lists become a storyboard component |
//! | 2 | 3 | The storyboard component joins the top-level elements |
//! | 3 | 4 | `package.json` entry points move under `public/` |
//! | 4 | 5 | Flat contents become a tree |
//! | 5 | 6 | Legacy code and UI JS files become text files |
//!
//! # Example
//!
//! ```rust,ignore
//! use uto_migrations::{MigrationConfig, Migrator};
//! use uto_project::VersionedDocument;
//!
//! let document = VersionedDocument::from_json_str(&saved)?;
//! let outcome = Migrator::new(MigrationConfig::default()).run(document)?;
//! for diagnostic in &outcome.report.diagnostics {
//!     eprintln!("{}", diagnostic.message);
//! }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scenes;
pub mod steps;

// Re-exports
pub use config::{MigrationConfig, DEFAULT_PACKAGE_JSON_PATH, DEFAULT_PUBLIC_DIR_PREFIX};
pub use error::{ConfigError, MigrationError, MigrationResult, StepError};
pub use pipeline::{apply_migrations, migrate_json, MigrationOutcome, Migrator};
pub use report::{Diagnostic, DiagnosticKind, MigrationReport};
pub use scenes::{
    SceneConverter, SceneError, SceneFrame, SceneMetadata, StoryboardSceneConverter,
    STORYBOARD_COMPONENT_NAME, STORYBOARD_UID,
};
pub use steps::{
    migrate_from_version_0, migrate_from_version_1, migrate_from_version_2,
    migrate_from_version_3, migrate_from_version_4, migrate_from_version_5, MigrationStep,
    StepContext, StepFn, MIGRATION_STEPS,
};
pub use uto_project::CURRENT_PROJECT_VERSION;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
