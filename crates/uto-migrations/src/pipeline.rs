//! Migration pipeline
//!
//! Runs every step of [`MIGRATION_STEPS`] in order. Steps that do not recognize the document's
//! version return it unchanged, so any saved document can be fed through the whole chain.

use serde_json::Value;
use uto_project::{CurrentDocument, VersionedDocument, CURRENT_PROJECT_VERSION};

use crate::config::MigrationConfig;
use crate::error::{MigrationError, MigrationResult};
use crate::report::MigrationReport;
use crate::scenes::{SceneConverter, StoryboardSceneConverter};
use crate::steps::{MigrationStep, StepContext, MIGRATION_STEPS};

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    /// Document at [`CURRENT_PROJECT_VERSION`]
    pub document: CurrentDocument,
    /// What the run did
    pub report: MigrationReport,
}

/// Configured migration pipeline
#[derive(Debug)]
pub struct Migrator {
    config: MigrationConfig,
    converter: Box<dyn SceneConverter>,
}

impl Migrator {
    /// Create pipeline with the storyboard scene converter
    #[must_use]
    pub fn new(config: MigrationConfig) -> Self {
        Self {
            config,
            converter: Box::new(StoryboardSceneConverter::new()),
        }
    }

    /// With scene converter
    #[must_use]
    pub fn with_scene_converter(mut self, converter: impl SceneConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Migrate a document to [`CURRENT_PROJECT_VERSION`]
    ///
    /// # Errors
    /// Returns [`MigrationError::Step`] naming the version the document stopped at if a step fails
    pub fn run(&self, document: VersionedDocument) -> MigrationResult<MigrationOutcome> {
        self.run_steps(&MIGRATION_STEPS, document)
    }

    fn run_steps(
        &self,
        steps: &[MigrationStep],
        document: VersionedDocument,
    ) -> MigrationResult<MigrationOutcome> {
        let from_version = document.version();
        let mut ctx = StepContext::new(&self.config, self.converter.as_ref());
        let mut report = MigrationReport {
            from_version,
            ..MigrationReport::default()
        };

        let mut document = document;
        for step in steps {
            let before = document.version();
            document = (step.apply)(document, &mut ctx).map_err(|source| {
                tracing::error!(from_version = step.from_version, step = step.name, %source, "migration step failed");
                MigrationError::Step {
                    from_version: step.from_version,
                    source,
                }
            })?;
            if document.version() != before {
                tracing::debug!(step = step.name, to_version = document.version(), "applied migration step");
                report.steps_applied.push(step.name);
            }
        }

        report.to_version = document.version();
        report.diagnostics = ctx.take_diagnostics();
        let VersionedDocument::V6(document) = document else {
            return Err(MigrationError::Incomplete {
                version: report.to_version,
            });
        };

        if report.migrated() {
            tracing::info!(
                from_version,
                to_version = CURRENT_PROJECT_VERSION,
                steps = report.steps_applied.len(),
                diagnostics = report.diagnostics.len(),
                "migrated project document"
            );
        }
        Ok(MigrationOutcome { document, report })
    }

    /// Decode, migrate and re-encode a persisted document
    ///
    /// # Errors
    /// Returns error if the input cannot be decoded, a step fails, or the result cannot be encoded
    pub fn run_json(&self, value: Value) -> MigrationResult<(Value, MigrationReport)> {
        let document = VersionedDocument::from_json(value)?;
        let MigrationOutcome { document, report } = self.run(document)?;
        let encoded = VersionedDocument::V6(document).to_json()?;
        Ok((encoded, report))
    }
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new(MigrationConfig::default())
    }
}

/// Migrate a document with the default configuration
///
/// # Errors
/// Returns error if a step fails
pub fn apply_migrations(document: VersionedDocument) -> MigrationResult<CurrentDocument> {
    Migrator::default().run(document).map(|outcome| outcome.document)
}

/// Migrate a persisted JSON document
///
/// # Errors
/// Returns error if the input cannot be decoded, a step fails, or the result cannot be encoded
pub fn migrate_json(
    value: Value,
    config: MigrationConfig,
) -> MigrationResult<(Value, MigrationReport)> {
    Migrator::new(config).run_json(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DiagnosticKind;
    use crate::scenes::SceneError;
    use serde_json::json;

    #[derive(Debug)]
    struct FailingConverter;

    impl SceneConverter for FailingConverter {
        fn convert(&self, _scenes: &Value) -> Result<Value, SceneError> {
            Err(SceneError::NotAnArray)
        }
    }

    fn document_with_scenes() -> Value {
        json!({
            "projectVersion": 1,
            "projectContents": {
                "/src/app.js": {
                    "type": "UI_JS_FILE",
                    "fileContents": {
                        "type": "PARSE_SUCCESS",
                        "value": {
                            "code": "export var App = 1",
                            "topLevelElements": [],
                            "canvasMetadata": {"type": "RIGHT", "value": {"scenes": []}}
                        }
                    },
                    "lastSavedContents": null,
                    "lastRevisedTime": 7
                }
            }
        })
    }

    #[test]
    fn current_document_runs_no_steps() {
        let (value, report) = migrate_json(
            json!({"projectVersion": 6, "projectContents": {}}),
            MigrationConfig::default(),
        )
        .unwrap();
        assert!(!report.migrated());
        assert_eq!(report.from_version, 6);
        assert_eq!(value["projectVersion"], json!(6));
    }

    #[test]
    fn custom_converter_failure_is_isolated() {
        let migrator = Migrator::default().with_scene_converter(FailingConverter);
        let (_, report) = migrator.run_json(document_with_scenes()).unwrap();
        let skipped: Vec<_> = report
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::FileSkipped)
            .collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].from_version, 1);
        assert_eq!(skipped[0].path.as_deref(), Some("/src/app.js"));
    }

    #[test]
    fn custom_converter_failure_is_fatal_without_isolation() {
        let migrator = Migrator::new(MigrationConfig::new().with_file_isolation(false))
            .with_scene_converter(FailingConverter);
        let error = migrator.run_json(document_with_scenes()).unwrap_err();
        assert_eq!(error.stopped_at_version(), Some(1));
    }

    #[test]
    fn truncated_chain_is_incomplete() {
        let document = VersionedDocument::from_json(json!({"projectVersion": 4, "projectContents": {}}))
            .unwrap();
        let error = Migrator::default()
            .run_steps(&MIGRATION_STEPS[..5], document)
            .unwrap_err();
        assert!(matches!(error, MigrationError::Incomplete { version: 5 }));
        assert_eq!(error.stopped_at_version(), Some(5));
    }
}
