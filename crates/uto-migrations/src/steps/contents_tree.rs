use uto_project::{contents_to_tree_lenient, VersionedDocument};

use super::StepContext;
use crate::error::StepError;

const FROM_VERSION: u32 = 4;

/// Version 4 → 5: flat contents become a contents tree
///
/// File entries are carried over unchanged; missing intermediate directories are synthesized.
/// An entry the tree cannot hold (invalid path, or nested under a file) is left out and reported.
///
/// # Errors
/// Returns [`StepError::ContentsTree`] for the first such entry if file isolation is off
pub fn migrate_from_version_4(
    document: VersionedDocument,
    ctx: &mut StepContext<'_>,
) -> Result<VersionedDocument, StepError> {
    let document = match document {
        VersionedDocument::V4(document) => document,
        other => return Ok(other),
    };
    let (tree, rejected) = contents_to_tree_lenient(&document.project_contents);
    for entry in rejected {
        ctx.recover_file(FROM_VERSION, &entry.path, StepError::ContentsTree(entry.error))?;
    }
    tracing::debug!(
        entries = document.project_contents.len(),
        roots = tree.len(),
        "arranged contents into a tree"
    );
    Ok(VersionedDocument::V5(document.with_contents(tree)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DiagnosticKind;
    use crate::{MigrationConfig, StoryboardSceneConverter};
    use pretty_assertions::assert_eq;
    use uto_project::{
        default_directory_marker, get_contents_tree, get_contents_tree_file, CodeFile,
        FlatContents, LegacyFile, PersistentDocument,
    };

    fn document(entries: &[(&str, LegacyFile)]) -> VersionedDocument {
        VersionedDocument::V4(PersistentDocument {
            open_files: Vec::new(),
            selected_file: None,
            project_contents: entries
                .iter()
                .map(|(path, file)| ((*path).to_string(), file.clone()))
                .collect::<FlatContents>(),
            extra: serde_json::Map::new(),
        })
    }

    fn code(text: &str) -> LegacyFile {
        LegacyFile::Code(CodeFile::new(text))
    }

    #[test]
    fn nests_files_under_synthesized_directories() {
        let config = MigrationConfig::new();
        let converter = StoryboardSceneConverter::new();
        let mut ctx = StepContext::new(&config, &converter);

        let migrated =
            migrate_from_version_4(document(&[("/src/app.js", code("app"))]), &mut ctx).unwrap();
        let VersionedDocument::V5(migrated) = migrated else {
            panic!("expected version 5");
        };
        assert!(get_contents_tree(&migrated.project_contents, "/src").is_some());
        assert_eq!(
            get_contents_tree_file(&migrated.project_contents, "/src/app.js"),
            Some(&code("app"))
        );
        assert!(ctx.diagnostics().is_empty());
    }

    #[test]
    fn unplaceable_entries_are_skipped_and_reported() {
        let config = MigrationConfig::new();
        let converter = StoryboardSceneConverter::new();
        let mut ctx = StepContext::new(&config, &converter);
        let input = document(&[
            ("/assets/", LegacyFile::Other(default_directory_marker())),
            ("/notes", code("notes")),
            ("/notes/todo.md", code("todo")),
            ("/src/app.js", code("app")),
        ]);

        let VersionedDocument::V5(migrated) = migrate_from_version_4(input, &mut ctx).unwrap()
        else {
            panic!("expected version 5");
        };
        assert_eq!(
            get_contents_tree_file(&migrated.project_contents, "/notes"),
            Some(&code("notes"))
        );
        assert_eq!(
            get_contents_tree_file(&migrated.project_contents, "/src/app.js"),
            Some(&code("app"))
        );

        let skipped: Vec<_> = ctx
            .diagnostics()
            .iter()
            .map(|d| (d.kind, d.from_version, d.path.as_deref()))
            .collect();
        assert_eq!(
            skipped,
            vec![
                (DiagnosticKind::FileSkipped, 4, Some("/assets/")),
                (DiagnosticKind::FileSkipped, 4, Some("/notes/todo.md")),
            ]
        );
    }

    #[test]
    fn unplaceable_entry_is_fatal_without_isolation() {
        let config = MigrationConfig::new().with_file_isolation(false);
        let converter = StoryboardSceneConverter::new();
        let mut ctx = StepContext::new(&config, &converter);

        let result = migrate_from_version_4(
            document(&[("/notes", code("notes")), ("/notes/todo.md", code("todo"))]),
            &mut ctx,
        );
        assert!(matches!(result, Err(StepError::ContentsTree(_))));
    }

    #[test]
    fn other_versions_pass_through() {
        let config = MigrationConfig::new();
        let converter = StoryboardSceneConverter::new();
        let mut ctx = StepContext::new(&config, &converter);
        let current = VersionedDocument::V6(PersistentDocument {
            open_files: Vec::new(),
            selected_file: None,
            project_contents: uto_project::CurrentContents::new(),
            extra: serde_json::Map::new(),
        });
        assert_eq!(migrate_from_version_4(current.clone(), &mut ctx).unwrap(), current);
    }
}
