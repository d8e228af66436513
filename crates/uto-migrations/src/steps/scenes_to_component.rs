use uto_project::{CanvasMetadata, Either, LegacyFile, VersionedDocument};

use super::{update_files, StepContext};
use crate::error::StepError;

const FROM_VERSION: u32 = 1;

/// Version 1 → 2: scene lists in canvas metadata become a synthesized storyboard component
///
/// Only UI JS files with a successful parse and `RIGHT` canvas metadata that has scenes but no
/// component yet are rewritten.
///
/// # Errors
/// Returns [`StepError::SceneConversion`] if a scene list cannot be converted and file isolation
/// is off
pub fn migrate_from_version_1(
    document: VersionedDocument,
    ctx: &mut StepContext<'_>,
) -> Result<VersionedDocument, StepError> {
    let mut document = match document {
        VersionedDocument::V1(document) => document,
        other => return Ok(other),
    };
    document.project_contents =
        update_files(FROM_VERSION, &document.project_contents, ctx, convert_scenes)?;
    Ok(VersionedDocument::V2(document))
}

fn convert_scenes(
    path: &str,
    file: &LegacyFile,
    ctx: &StepContext<'_>,
) -> Result<Option<LegacyFile>, StepError> {
    let Some(ui_js) = file.as_ui_js() else {
        return Ok(None);
    };
    let Some(success) = ui_js.parse_success() else {
        return Ok(None);
    };
    let Some(metadata) = success.canvas_metadata.as_ref().and_then(Either::right) else {
        return Ok(None);
    };
    if metadata.utopia_canvas_jsx_component.is_some() {
        return Ok(None);
    }
    let Some(scenes) = metadata.scenes.as_ref().filter(|scenes| !scenes.is_null()) else {
        return Ok(None);
    };

    let component = ctx
        .converter()
        .convert(scenes)
        .map_err(|source| StepError::SceneConversion {
            path: path.to_string(),
            source,
        })?;
    tracing::debug!(path, "converted scene metadata into a storyboard component");

    let mut success = success.clone();
    success.canvas_metadata = Some(Either::Right(CanvasMetadata {
        utopia_canvas_jsx_component: Some(component),
        ..CanvasMetadata::default()
    }));
    Ok(Some(LegacyFile::UiJs(ui_js.with_parse_success(success))))
}
