use uto_project::{CanvasMetadata, Either, LegacyFile, VersionedDocument};

use super::{update_files, StepContext};
use crate::error::StepError;

const FROM_VERSION: u32 = 2;

/// Version 2 → 3: the canvas component joins the top-level elements
///
/// The component is appended after the existing elements and the metadata slot is emptied. Every
/// successfully parsed file is flagged as having contained old scene metadata.
///
/// # Errors
/// Never fails; the signature is shared with the other steps
pub fn migrate_from_version_2(
    document: VersionedDocument,
    ctx: &mut StepContext<'_>,
) -> Result<VersionedDocument, StepError> {
    let mut document = match document {
        VersionedDocument::V2(document) => document,
        other => return Ok(other),
    };
    document.project_contents =
        update_files(FROM_VERSION, &document.project_contents, ctx, merge_metadata)?;
    Ok(VersionedDocument::V3(document))
}

fn merge_metadata(
    _path: &str,
    file: &LegacyFile,
    _ctx: &StepContext<'_>,
) -> Result<Option<LegacyFile>, StepError> {
    let Some(ui_js) = file.as_ui_js() else {
        return Ok(None);
    };
    let Some(success) = ui_js.parse_success() else {
        return Ok(None);
    };

    let mut success = success.clone();
    let component = success
        .canvas_metadata
        .as_ref()
        .and_then(Either::right)
        .and_then(|metadata| metadata.utopia_canvas_jsx_component.clone());
    if let Some(component) = component {
        success.top_level_elements.push_back(component);
        success.canvas_metadata = Some(Either::Right(CanvasMetadata::default()));
    }
    success.project_contained_old_scene_metadata = Some(true);
    Ok(Some(LegacyFile::UiJs(ui_js.with_parse_success(success))))
}
