use uto_project::{
    try_map_tree_files, LegacyFile, ProjectFile, TextFile, TextFileContents, VersionedDocument,
};

use super::StepContext;
use crate::error::StepError;

const FROM_VERSION: u32 = 5;

/// Version 5 → 6: legacy code and UI JS files become text files
///
/// Both become unparsed text with the code ahead of the parsed model. UI JS files keep their
/// revision time; code files get time zero. Other entries are carried over verbatim.
///
/// # Errors
/// Returns [`StepError::LegacyFile`] if a UI JS file has no source text to carry over and file
/// isolation is off
pub fn migrate_from_version_5(
    document: VersionedDocument,
    ctx: &mut StepContext<'_>,
) -> Result<VersionedDocument, StepError> {
    let document = match document {
        VersionedDocument::V5(document) => document,
        other => return Ok(other),
    };

    let mut convert = |path: &str, file: &LegacyFile| -> Result<ProjectFile, StepError> {
        match to_project_file(path, file) {
            Ok(file) => Ok(file),
            Err(error) => {
                ctx.recover_file(FROM_VERSION, path, error)?;
                Ok(opaque(file))
            }
        }
    };
    let contents = try_map_tree_files(&document.project_contents, &mut convert)?;
    Ok(VersionedDocument::V6(document.with_contents(contents)))
}

fn to_project_file(path: &str, file: &LegacyFile) -> Result<ProjectFile, StepError> {
    match file {
        LegacyFile::Code(code) => Ok(ProjectFile::Text(TextFile::new(
            TextFileContents::code_ahead(code.file_contents.clone()),
            None,
            0,
        ))),
        LegacyFile::UiJs(ui_js) => {
            let code = ui_js
                .parse_success()
                .and_then(|success| success.code.clone())
                .ok_or_else(|| StepError::legacy_file(path, "UI JS file has no parsed source text"))?;
            Ok(ProjectFile::Text(TextFile::new(
                TextFileContents::code_ahead(code),
                None,
                ui_js.last_revised_time,
            )))
        }
        LegacyFile::Other(value) => Ok(ProjectFile::Other(value.clone())),
    }
}

/// Entry kept exactly as persisted
fn opaque(file: &LegacyFile) -> ProjectFile {
    match serde_json::to_value(file) {
        Ok(value) => ProjectFile::Other(value),
        Err(error) => {
            tracing::warn!(%error, "could not re-encode legacy file, dropping its content");
            ProjectFile::Other(serde_json::Value::Null)
        }
    }
}
