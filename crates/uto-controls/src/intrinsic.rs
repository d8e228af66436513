//! Controls for intrinsic elements provided by third-party packages

use serde_json::Value;
use uto_project::{get_contents_tree_file, CurrentContents, ProjectFile};

use crate::controls::ParsedPropertyControls;
use crate::registry::PropertyControlsInfo;

/// Path of the build config in the project contents
pub const PACKAGE_JSON_PATH: &str = "/package.json";

const DEPENDENCY_KEYS: [&str; 2] = ["dependencies", "devDependencies"];

/// Names declared in `dependencies` and `devDependencies` of the project's `package.json`
///
/// A missing or unreadable build config declares nothing.
#[must_use]
pub fn combined_dependencies(contents: &CurrentContents) -> Vec<String> {
    let Some(text) = get_contents_tree_file(contents, PACKAGE_JSON_PATH)
        .and_then(ProjectFile::as_text)
        .map(|file| file.file_contents.code())
    else {
        return Vec::new();
    };
    let parsed: Value = match serde_json::from_str(text) {
        Ok(parsed) => parsed,
        Err(error) => {
            tracing::debug!(%error, "package.json is not valid JSON, no dependencies");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = DEPENDENCY_KEYS
        .iter()
        .filter_map(|key| parsed.get(key).and_then(Value::as_object))
        .flat_map(|dependencies| dependencies.keys().cloned())
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Controls of `element_name` registered by a module the project depends on
///
/// Modules are searched in key order; the first declared dependency registering the element wins.
#[must_use]
pub fn third_party_controls_intrinsic<'a>(
    element_name: &str,
    info: &'a PropertyControlsInfo,
    contents: &CurrentContents,
) -> Option<&'a ParsedPropertyControls> {
    let dependencies = combined_dependencies(contents);
    info.iter()
        .find(|(module, components)| {
            components.contains_key(element_name) && dependencies.iter().any(|name| name == *module)
        })
        .and_then(|(_, components)| components.get(element_name))
        .map(|descriptor| &descriptor.property_controls)
}
