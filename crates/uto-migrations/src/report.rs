//! Migration report and non-fatal diagnostics

use serde::Serialize;

/// Kind of a recovered problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No usable build config; its rewrite was skipped
    MissingPackageJson,
    /// A build config entry point was absent or not a string and was left as is
    EntryPointUnchanged,
    /// A file failed its step and was kept unchanged
    FileSkipped,
}

/// A problem recovered from during migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Version the reporting step migrates from
    pub from_version: u32,
    /// What happened
    pub kind: DiagnosticKind,
    /// File concerned, if any
    pub path: Option<String>,
    /// Human-readable detail
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic
    #[must_use]
    pub fn new(
        from_version: u32,
        kind: DiagnosticKind,
        path: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            from_version,
            kind,
            path,
            message: message.into(),
        }
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MigrationReport {
    /// Version the document was loaded at
    pub from_version: u32,
    /// Version reached
    pub to_version: u32,
    /// Names of the steps that changed the document, in order
    pub steps_applied: Vec<&'static str>,
    /// Recovered problems, in the order they occurred
    pub diagnostics: Vec<Diagnostic>,
}

impl MigrationReport {
    /// Check whether any step changed the document
    #[inline]
    #[must_use]
    pub fn migrated(&self) -> bool {
        !self.steps_applied.is_empty()
    }

    /// Check for diagnostics of a kind
    #[must_use]
    pub fn has(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == kind)
    }
}
