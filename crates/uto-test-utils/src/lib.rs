//! Testing utilities for the Uto workspace
//!
//! Fixtures for persisted project documents at every schema version.

#![allow(missing_docs)]

use serde_json::{json, Value};
use uto_project::VersionedDocument;

pub const APP_PATH: &str = "/src/app.js";
pub const PACKAGE_JSON_PATH: &str = "/package.json";

pub fn code_file_value(text: &str) -> Value {
    json!({
        "type": "CODE_FILE",
        "fileContents": text,
        "lastSavedContents": null
    })
}

pub fn ui_js_file_value(code: &str, canvas_metadata: Option<Value>, revised_at: u64) -> Value {
    let mut value = json!({
        "code": code,
        "imports": {},
        "topLevelElements": [
            {"type": "UTOPIA_JSX_COMPONENT", "name": "App"},
            {"type": "ARBITRARY_JS_BLOCK", "javascript": "const x = 1"}
        ]
    });
    if let Some(metadata) = canvas_metadata {
        value["canvasMetadata"] = metadata;
    }
    json!({
        "type": "UI_JS_FILE",
        "fileContents": {"type": "PARSE_SUCCESS", "value": value},
        "lastSavedContents": null,
        "lastRevisedTime": revised_at
    })
}

pub fn scenes_metadata() -> Value {
    json!({
        "type": "RIGHT",
        "value": {
            "scenes": [
                {
                    "uid": "scene-aaa",
                    "component": "App",
                    "props": {"title": "Hello"},
                    "frame": {"left": 0, "top": 0, "width": 400, "height": 400},
                    "label": "Main"
                }
            ]
        }
    })
}

pub fn component_metadata() -> Value {
    json!({
        "type": "RIGHT",
        "value": {
            "utopiaCanvasJSXComponent": {"type": "UTOPIA_JSX_COMPONENT", "name": "storyboard"}
        }
    })
}

pub fn package_json_text(html: &str, js: &str) -> String {
    format!(
        "{{\n  \"name\": \"demo\",\n  \"utopia\": {{\n    \"html\": \"{html}\",\n    \"js\": \"{js}\"\n  }},\n  \"dependencies\": {{\"react\": \"16.13.1\"}}\n}}"
    )
}

/// Version 0 document with bare tabs, scene metadata and a build config
pub fn document_v0_value() -> Value {
    json!({
        "openFiles": [APP_PATH, PACKAGE_JSON_PATH],
        "selectedFile": APP_PATH,
        "appID": "demo-app",
        "projectContents": {
            "/src": {"type": "DIRECTORY"},
            APP_PATH: ui_js_file_value("export var App = 1", Some(scenes_metadata()), 1_500),
            "/src/util.js": code_file_value("export const util = 1"),
            PACKAGE_JSON_PATH: code_file_value(&package_json_text("index.html", "index.js")),
            "/assets/logo.png": {"type": "IMAGE_FILE", "base64": "AA=="}
        }
    })
}

/// Flat document at `version` with the given contents and file tabs
pub fn flat_document_value(version: u32, project_contents: Value) -> Value {
    json!({
        "projectVersion": version,
        "openFiles": [{"type": "OPEN_FILE_TAB", "filename": APP_PATH}],
        "selectedFile": {"type": "OPEN_FILE_TAB", "filename": APP_PATH},
        "projectContents": project_contents
    })
}

/// Version 5 document holding one legacy file under `/src`
pub fn tree_document_v5_value(name: &str, file: Value) -> Value {
    json!({
        "projectVersion": 5,
        "openFiles": [],
        "selectedFile": null,
        "projectContents": {
            "src": {
                "type": "PROJECT_CONTENT_DIRECTORY",
                "fullPath": "/src",
                "directory": {"type": "DIRECTORY"},
                "children": {
                    name: {
                        "type": "PROJECT_CONTENT_FILE",
                        "fullPath": format!("/src/{name}"),
                        "content": file
                    }
                }
            }
        }
    })
}

pub fn decode(value: Value) -> VersionedDocument {
    VersionedDocument::from_json(value).unwrap()
}

pub fn document_v0() -> VersionedDocument {
    decode(document_v0_value())
}
