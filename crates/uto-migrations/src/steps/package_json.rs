use serde_json::Value;
use uto_project::{CodeFile, LegacyFile, VersionedDocument};

use super::StepContext;
use crate::error::StepError;
use crate::report::{Diagnostic, DiagnosticKind};

const FROM_VERSION: u32 = 3;

/// Entry point keys rewritten under the `utopia` object
const ENTRY_POINT_KEYS: [&str; 2] = ["html", "js"];

/// Version 3 → 4: build config entry points move under the public directory
///
/// A missing or non-code build config is reported as a diagnostic and the version still advances.
/// So does an entry point that is absent or not a string, which is left as it was.
///
/// # Errors
/// Returns [`StepError::MalformedPackageJson`] if the build config is not JSON, or
/// [`StepError::PackageJsonShape`] if it has no `utopia` object
pub fn migrate_from_version_3(
    document: VersionedDocument,
    ctx: &mut StepContext<'_>,
) -> Result<VersionedDocument, StepError> {
    let mut document = match document {
        VersionedDocument::V3(document) => document,
        other => return Ok(other),
    };
    let path = ctx.config().package_json_path.clone();

    let Some(package_json) = document.project_contents.get(&path).and_then(LegacyFile::as_code)
    else {
        tracing::error!(path = %path, "no package.json code file, skipping entry point rewrite");
        ctx.report(Diagnostic::new(
            FROM_VERSION,
            DiagnosticKind::MissingPackageJson,
            Some(path),
            "build config missing or not a code file, entry points left unchanged",
        ));
        return Ok(VersionedDocument::V4(document));
    };

    let RewrittenEntryPoints { text, unchanged } = rewrite_entry_points(
        &package_json.file_contents,
        &ctx.config().public_dir_prefix,
    )?;
    for key in unchanged {
        tracing::warn!(path = %path, key, "entry point is not a string, left unchanged");
        ctx.report(Diagnostic::new(
            FROM_VERSION,
            DiagnosticKind::EntryPointUnchanged,
            Some(path.clone()),
            format!("`utopia.{key}` is absent or not a string"),
        ));
    }
    tracing::info!(path = %path, "rewrote package.json entry points");
    document
        .project_contents
        .insert(path, LegacyFile::Code(CodeFile::new(text)));
    Ok(VersionedDocument::V4(document))
}

#[derive(Debug)]
struct RewrittenEntryPoints {
    text: String,
    /// Keys that were absent or not strings
    unchanged: Vec<&'static str>,
}

/// Prefix the `utopia.html` and `utopia.js` entries, printing with two-space indentation
fn rewrite_entry_points(text: &str, prefix: &str) -> Result<RewrittenEntryPoints, StepError> {
    let mut parsed: Value = serde_json::from_str(text).map_err(StepError::MalformedPackageJson)?;
    let utopia = parsed
        .get_mut("utopia")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| StepError::PackageJsonShape("missing `utopia` object".to_string()))?;

    let mut unchanged = Vec::new();
    for key in ENTRY_POINT_KEYS {
        match utopia.get_mut(key) {
            Some(Value::String(current)) => current.insert_str(0, prefix),
            _ => unchanged.push(key),
        }
    }

    let text = serde_json::to_string_pretty(&parsed).map_err(StepError::Encode)?;
    Ok(RewrittenEntryPoints { text, unchanged })
}
