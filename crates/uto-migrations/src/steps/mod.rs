//! The individual migration steps
//!
//! Each step is a guard clause over [`VersionedDocument`]: a document at any other version is
//! returned unchanged, a document at the step's version is rewritten into the next version's
//! shape. [`MIGRATION_STEPS`] lists them in the order they must run.

mod contents_tree;
mod merge_metadata;
mod package_json;
mod scenes_to_component;
mod tabs;
mod text_files;

pub use contents_tree::migrate_from_version_4;
pub use merge_metadata::migrate_from_version_2;
pub use package_json::migrate_from_version_3;
pub use scenes_to_component::migrate_from_version_1;
pub use tabs::migrate_from_version_0;
pub use text_files::migrate_from_version_5;

use uto_project::{FlatContents, LegacyFile, VersionedDocument};

use crate::config::MigrationConfig;
use crate::error::StepError;
use crate::report::{Diagnostic, DiagnosticKind};
use crate::scenes::SceneConverter;

/// Signature shared by every step
pub type StepFn = fn(VersionedDocument, &mut StepContext<'_>) -> Result<VersionedDocument, StepError>;

/// A named step of the chain
#[derive(Debug, Clone, Copy)]
pub struct MigrationStep {
    /// Version the step migrates from
    pub from_version: u32,
    /// Short name used in logs and reports
    pub name: &'static str,
    /// Transformation
    pub apply: StepFn,
}

/// Every step, in application order
pub const MIGRATION_STEPS: [MigrationStep; 6] = [
    MigrationStep {
        from_version: 0,
        name: "tabs",
        apply: migrate_from_version_0,
    },
    MigrationStep {
        from_version: 1,
        name: "scenes_to_component",
        apply: migrate_from_version_1,
    },
    MigrationStep {
        from_version: 2,
        name: "merge_canvas_metadata",
        apply: migrate_from_version_2,
    },
    MigrationStep {
        from_version: 3,
        name: "package_json_paths",
        apply: migrate_from_version_3,
    },
    MigrationStep {
        from_version: 4,
        name: "contents_tree",
        apply: migrate_from_version_4,
    },
    MigrationStep {
        from_version: 5,
        name: "text_files",
        apply: migrate_from_version_5,
    },
];

/// Collaborators and diagnostics shared by the steps of one run
#[derive(Debug)]
pub struct StepContext<'a> {
    config: &'a MigrationConfig,
    converter: &'a dyn SceneConverter,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> StepContext<'a> {
    /// Create context
    #[must_use]
    pub fn new(config: &'a MigrationConfig, converter: &'a dyn SceneConverter) -> Self {
        Self {
            config,
            converter,
            diagnostics: Vec::new(),
        }
    }

    /// Configuration of the run
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        self.config
    }

    /// Scene converter of the run
    #[inline]
    #[must_use]
    pub fn converter(&self) -> &dyn SceneConverter {
        self.converter
    }

    /// Diagnostics recorded so far
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the recorded diagnostics
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Keep a failing file unchanged when isolation is on, otherwise fail the step
    pub(crate) fn recover_file(
        &mut self,
        from_version: u32,
        path: &str,
        error: StepError,
    ) -> Result<(), StepError> {
        if !self.config.isolate_file_failures {
            return Err(error);
        }
        tracing::warn!(from_version, path, %error, "keeping file unchanged");
        self.report(Diagnostic::new(
            from_version,
            DiagnosticKind::FileSkipped,
            Some(path.to_string()),
            error.to_string(),
        ));
        Ok(())
    }
}

/// Rewrite files of flat contents one by one
///
/// `update` returns `Ok(None)` for files it leaves alone. Unchanged entries stay shared with the
/// input map.
pub(crate) fn update_files<U>(
    from_version: u32,
    contents: &FlatContents,
    ctx: &mut StepContext<'_>,
    mut update: U,
) -> Result<FlatContents, StepError>
where
    U: FnMut(&str, &LegacyFile, &StepContext<'_>) -> Result<Option<LegacyFile>, StepError>,
{
    let mut updated = contents.clone();
    for (path, file) in contents {
        match update(path, file, ctx) {
            Ok(Some(file)) => {
                updated.insert(path.clone(), file);
            }
            Ok(None) => {}
            Err(error) => ctx.recover_file(from_version, path, error)?,
        }
    }
    Ok(updated)
}
