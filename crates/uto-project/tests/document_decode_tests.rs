use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use uto_project::{
    get_contents_tree_file, LegacyFile, ParsedTextFile, ProjectFile, ProjectPath, RevisionsState,
    VersionedDocument,
};

#[test]
fn decodes_version_zero_document() {
    let document = VersionedDocument::from_json(json!({
        "projectVersion": 0,
        "openFiles": ["/src/app.js"],
        "selectedFile": "",
        "projectContents": {
            "/src": {"type": "DIRECTORY"},
            "/src/app.js": {
                "type": "UI_JS_FILE",
                "fileContents": {"type": "UNPARSED"},
                "lastSavedContents": null,
                "lastRevisedTime": 0
            },
            "/assets/logo.png": {"type": "IMAGE_FILE", "base64": "AA=="}
        }
    }))
    .unwrap();

    let VersionedDocument::V0(v0) = document else {
        panic!("expected version 0");
    };
    assert_eq!(v0.open_files, vec![json!("/src/app.js")]);
    assert_eq!(v0.selected_file, Some(json!("")));
    assert!(matches!(v0.project_contents.get("/src"), Some(LegacyFile::Other(_))));
    assert!(matches!(v0.project_contents.get("/src/app.js"), Some(LegacyFile::UiJs(_))));
    assert!(matches!(
        v0.project_contents.get("/assets/logo.png"),
        Some(LegacyFile::Other(_))
    ));
}

#[test]
fn version_zero_accepts_tagged_tabs() {
    let document = VersionedDocument::from_json(json!({
        "openFiles": ["/src/app.js", {"type": "OPEN_FILE_TAB", "filename": "/src/b.js"}],
        "selectedFile": {"type": "RELEASE_NOTES_TAB"},
        "projectContents": {}
    }))
    .unwrap();
    let VersionedDocument::V0(v0) = document else {
        panic!("expected version 0");
    };
    assert_eq!(v0.open_files.len(), 2);
    assert_eq!(v0.selected_file, Some(json!({"type": "RELEASE_NOTES_TAB"})));
}

#[test]
fn decodes_current_document() {
    let document = VersionedDocument::from_json_str(
        r#"{
            "projectVersion": 6,
            "openFiles": [{"type": "OPEN_FILE_TAB", "filename": "/src/app.js"}],
            "selectedFile": null,
            "projectContents": {
                "src": {
                    "type": "PROJECT_CONTENT_DIRECTORY",
                    "fullPath": "/src",
                    "directory": {"type": "DIRECTORY"},
                    "children": {
                        "app.js": {
                            "type": "PROJECT_CONTENT_FILE",
                            "fullPath": "/src/app.js",
                            "content": {
                                "type": "TEXT_FILE",
                                "fileContents": {
                                    "code": "export var App = 1",
                                    "parsed": {"type": "UNPARSED"},
                                    "revisionsState": "CODE_AHEAD"
                                },
                                "lastSavedContents": null,
                                "lastParseSuccess": null,
                                "lastRevisedTime": 42
                            }
                        }
                    }
                }
            }
        }"#,
    )
    .unwrap();

    assert!(document.is_current());
    let VersionedDocument::V6(current) = &document else {
        panic!("expected version 6");
    };
    let Some(ProjectFile::Text(file)) =
        get_contents_tree_file(&current.project_contents, "/src/app.js")
    else {
        panic!("expected text file");
    };
    assert_eq!(file.file_contents.code(), "export var App = 1");
    assert_eq!(file.file_contents.parsed(), &ParsedTextFile::Unparsed);
    assert_eq!(
        file.file_contents.revisions_state(),
        RevisionsState::CodeAhead
    );
    assert_eq!(file.last_revised_time, 42);
}

#[test]
fn invalid_json_text_is_reported() {
    let result = VersionedDocument::from_json_str("{ not json");
    assert!(matches!(result, Err(uto_project::DecodeError::Json(_))));
}

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,8}(\\.[a-z]{1,3})?"
}

proptest! {
    #[test]
    fn prop_path_display_parses_back(segments in prop::collection::vec(segment(), 0..6)) {
        let path = ProjectPath::new(segments);
        let reparsed: ProjectPath = path.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, path);
    }
}
