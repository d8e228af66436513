use uto_project::{DocumentV0, EditorTab, PersistentDocument, VersionedDocument};

use super::StepContext;
use crate::error::StepError;

/// Version 0 → 1: bare file names become tagged file tabs
///
/// An empty selected file name means nothing is selected. Entries that are already tagged tabs are
/// carried over as they are.
///
/// # Errors
/// Never fails; the signature is shared with the other steps
pub fn migrate_from_version_0(
    document: VersionedDocument,
    _ctx: &mut StepContext<'_>,
) -> Result<VersionedDocument, StepError> {
    let document = match document {
        VersionedDocument::V0(document) => document,
        other => return Ok(other),
    };
    let DocumentV0 {
        open_files,
        selected_file,
        project_contents,
        extra,
    } = document;

    Ok(VersionedDocument::V1(PersistentDocument {
        open_files: open_files.into_iter().map(EditorTab::from_legacy).collect(),
        selected_file: selected_file
            .filter(|selected| selected.as_str() != Some(""))
            .map(EditorTab::from_legacy),
        project_contents,
        extra,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MigrationConfig, StoryboardSceneConverter};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn run(document: VersionedDocument) -> VersionedDocument {
        let config = MigrationConfig::new();
        let converter = StoryboardSceneConverter::new();
        let mut ctx = StepContext::new(&config, &converter);
        migrate_from_version_0(document, &mut ctx).unwrap()
    }

    #[test]
    fn wraps_open_files_and_selection() {
        let document = VersionedDocument::V0(DocumentV0 {
            open_files: vec![json!("a.js"), json!("b.js")],
            selected_file: Some(json!("a.js")),
            ..DocumentV0::default()
        });
        let VersionedDocument::V1(migrated) = run(document) else {
            panic!("expected version 1");
        };
        assert_eq!(
            migrated.open_files,
            vec![EditorTab::open_file("a.js"), EditorTab::open_file("b.js")]
        );
        assert_eq!(migrated.selected_file, Some(EditorTab::open_file("a.js")));
    }

    #[test]
    fn empty_selection_becomes_none() {
        let document = VersionedDocument::V0(DocumentV0 {
            selected_file: Some(json!("")),
            ..DocumentV0::default()
        });
        let VersionedDocument::V1(migrated) = run(document) else {
            panic!("expected version 1");
        };
        assert_eq!(migrated.selected_file, None);
    }

    #[test]
    fn tagged_tabs_are_carried_over() {
        let release_notes = json!({"type": "RELEASE_NOTES_TAB"});
        let document = VersionedDocument::V0(DocumentV0 {
            open_files: vec![
                json!("a.js"),
                json!({"type": "OPEN_FILE_TAB", "filename": "b.js"}),
                release_notes.clone(),
            ],
            selected_file: Some(release_notes.clone()),
            ..DocumentV0::default()
        });
        let VersionedDocument::V1(migrated) = run(document) else {
            panic!("expected version 1");
        };
        assert_eq!(
            migrated.open_files,
            vec![
                EditorTab::open_file("a.js"),
                EditorTab::open_file("b.js"),
                EditorTab::Other(release_notes.clone()),
            ]
        );
        assert_eq!(migrated.selected_file, Some(EditorTab::Other(release_notes)));
    }

    #[test]
    fn other_versions_pass_through() {
        let document = VersionedDocument::V3(PersistentDocument {
            open_files: Vec::new(),
            selected_file: None,
            project_contents: uto_project::FlatContents::new(),
            extra: serde_json::Map::new(),
        });
        assert_eq!(run(document.clone()), document);
    }
}
