//! Fresh project contents and documents

use im::OrdMap;
use serde_json::{json, Map};
use uto_project::{
    contents_to_tree, CurrentContents, CurrentDocument, EditorTab, ModelResult, PersistentDocument,
    ProjectFile, TextFile,
};

use crate::samples::{
    default_ui_js_file, sample_preview_file, sample_preview_html_file, SourceParser,
};

/// Path of the build config
pub const PACKAGE_JSON_PATH: &str = "/package.json";

/// Path of the sample app
pub const APP_JS_PATH: &str = "/src/app.js";

/// Path of the preview entry point
pub const INDEX_JS_PATH: &str = "/src/index.js";

/// Path of the preview page
pub const INDEX_HTML_PATH: &str = "/public/index.html";

/// Build config pointing at the preview page and entry point
#[must_use]
pub fn default_package_json() -> TextFile {
    let package = json!({
        "name": "utopia-project",
        "version": "0.1.0",
        "utopia": {
            "html": INDEX_HTML_PATH.trim_start_matches('/'),
            "js": INDEX_JS_PATH.trim_start_matches('/'),
        },
        "dependencies": {
            "react": "16.13.1",
            "react-dom": "16.13.1",
            "utopia-api": "0.4.1",
        },
    });
    let text = serde_json::to_string_pretty(&package).unwrap_or_else(|error| {
        tracing::error!(%error, "could not print default package.json");
        String::from("{}")
    });
    TextFile::code_file(text, None)
}

/// Contents of a new project
///
/// # Errors
/// Returns error if the fixed paths cannot be arranged into a tree
pub fn default_project_contents(
    parser: &dyn SourceParser,
    now_ms: u64,
) -> ModelResult<CurrentContents> {
    let files: OrdMap<String, ProjectFile> = [
        (PACKAGE_JSON_PATH, default_package_json()),
        (APP_JS_PATH, default_ui_js_file(parser, now_ms)),
        (INDEX_JS_PATH, sample_preview_file()),
        (INDEX_HTML_PATH, sample_preview_html_file()),
    ]
    .into_iter()
    .map(|(path, file)| (path.to_string(), ProjectFile::Text(file)))
    .collect();
    contents_to_tree(&files)
}

/// Document for a new project with the sample app open
///
/// # Errors
/// Returns error if [`default_project_contents`] fails
pub fn new_project_document(
    parser: &dyn SourceParser,
    now_ms: u64,
) -> ModelResult<CurrentDocument> {
    let project_contents = default_project_contents(parser, now_ms)?;
    tracing::debug!(now_ms, "created new project document");
    Ok(PersistentDocument {
        open_files: vec![EditorTab::open_file(APP_JS_PATH)],
        selected_file: Some(EditorTab::open_file(APP_JS_PATH)),
        project_contents,
        extra: Map::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn package_json_names_entry_points() {
        let file = default_package_json();
        let parsed: Value = serde_json::from_str(file.file_contents.code()).unwrap();
        assert_eq!(parsed["utopia"]["html"], json!("public/index.html"));
        assert_eq!(parsed["utopia"]["js"], json!("src/index.js"));
        assert!(parsed["dependencies"]["react"].is_string());
    }
}
