//! Scene metadata to storyboard component conversion
//!
//! The oldest saves described the canvas as a list of scenes next to the parsed file. Later
//! editors model the canvas as a `storyboard` component whose root `Storyboard` element holds one
//! `Scene` child per scene. [`SceneConverter`] is the seam for that conversion; the migration chain
//! only needs the resulting component value.

use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Name of the synthesized canvas component
pub const STORYBOARD_COMPONENT_NAME: &str = "storyboard";

/// `data-uid` of the synthesized `Storyboard` element
pub const STORYBOARD_UID: &str = "utopia-storyboard-uid";

/// Errors converting scene metadata
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// `scenes` is not a list
    #[error("scene metadata is not an array")]
    NotAnArray,

    /// A scene entry has an unexpected shape
    #[error("scene {index} is invalid: {source}")]
    InvalidScene {
        /// Position in the list
        index: usize,
        /// Decode failure
        #[source]
        source: serde_json::Error,
    },
}

/// Converts a legacy scene list into a canvas component
pub trait SceneConverter: std::fmt::Debug + Send + Sync {
    /// Build the component standing for `scenes`
    ///
    /// # Errors
    /// Returns error if the scene list cannot be interpreted
    fn convert(&self, scenes: &Value) -> Result<Value, SceneError>;
}

/// Frame of a scene on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct SceneFrame {
    /// Left edge
    #[serde(default)]
    pub left: f64,
    /// Top edge
    #[serde(default)]
    pub top: f64,
    /// Width
    #[serde(default)]
    pub width: f64,
    /// Height
    #[serde(default)]
    pub height: f64,
}

/// One legacy scene entry
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SceneMetadata {
    /// Scene identifier
    #[serde(default)]
    pub uid: Option<String>,
    /// Name of the component the scene renders
    #[serde(default)]
    pub component: Option<String>,
    /// Props passed to the component
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Placement on the canvas
    #[serde(default)]
    pub frame: Option<SceneFrame>,
    /// Display label
    #[serde(default)]
    pub label: Option<String>,
}

/// Default converter producing a `storyboard` component
#[derive(Debug, Clone, Copy, Default)]
pub struct StoryboardSceneConverter;

impl StoryboardSceneConverter {
    /// Create converter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SceneConverter for StoryboardSceneConverter {
    fn convert(&self, scenes: &Value) -> Result<Value, SceneError> {
        let entries = scenes.as_array().ok_or(SceneError::NotAnArray)?;
        let children = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                SceneMetadata::deserialize(entry)
                    .map(|scene| scene_element(index, &scene))
                    .map_err(|source| SceneError::InvalidScene { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(json!({
            "type": "UTOPIA_JSX_COMPONENT",
            "name": STORYBOARD_COMPONENT_NAME,
            "isFunction": false,
            "params": null,
            "propsUsed": [],
            "rootElement": jsx_element(
                "Storyboard",
                vec![attribute("data-uid", json!(STORYBOARD_UID))],
                children,
            ),
            "arbitraryJSBlock": null,
            "usedInReactDOMRender": false,
        }))
    }
}

fn scene_element(index: usize, scene: &SceneMetadata) -> Value {
    let uid = scene
        .uid
        .clone()
        .unwrap_or_else(|| format!("scene-{index}"));
    let mut props = Vec::new();

    if let Some(component) = &scene.component {
        props.push(json!({
            "key": "component",
            "value": {
                "type": "ATTRIBUTE_OTHER_JAVASCRIPT",
                "javascript": component,
                "definedElsewhere": [component],
            },
        }));
    }
    if !scene.props.is_empty() {
        props.push(attribute("props", Value::Object(scene.props.clone())));
    }
    if let Some(frame) = scene.frame {
        props.push(attribute(
            "style",
            json!({
                "position": "absolute",
                "left": frame.left,
                "top": frame.top,
                "width": frame.width,
                "height": frame.height,
            }),
        ));
    }
    props.push(attribute("data-uid", json!(uid)));
    if let Some(label) = &scene.label {
        props.push(attribute("data-label", json!(label)));
    }

    jsx_element("Scene", props, Vec::new())
}

fn jsx_element(name: &str, props: Vec<Value>, children: Vec<Value>) -> Value {
    json!({
        "type": "JSX_ELEMENT",
        "name": { "baseVariable": name, "propertyPath": { "elements": [] } },
        "props": props,
        "children": children,
    })
}

fn attribute(key: &str, value: Value) -> Value {
    json!({
        "key": key,
        "value": { "type": "ATTRIBUTE_VALUE", "value": value },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scene_children(component: &Value) -> &Vec<Value> {
        component["rootElement"]["children"].as_array().unwrap()
    }

    #[test]
    fn builds_storyboard_with_one_scene_per_entry() {
        let scenes = json!([
            {
                "uid": "scene-a",
                "component": "App",
                "props": {"title": "Hi"},
                "frame": {"left": 0, "top": 0, "width": 400, "height": 400},
                "label": "Main"
            },
            {"component": "Card"}
        ]);
        let component = StoryboardSceneConverter::new().convert(&scenes).unwrap();

        assert_eq!(component["name"], json!("storyboard"));
        assert_eq!(
            component["rootElement"]["name"]["baseVariable"],
            json!("Storyboard")
        );
        let children = scene_children(&component);
        assert_eq!(children.len(), 2);

        let first = children[0]["props"].as_array().unwrap();
        let keys: Vec<_> = first.iter().map(|p| p["key"].as_str().unwrap()).collect();
        assert_eq!(keys, vec!["component", "props", "style", "data-uid", "data-label"]);
        assert_eq!(first[2]["value"]["value"]["width"], json!(400.0));

        let second = children[1]["props"].as_array().unwrap();
        let uid = second.iter().find(|p| p["key"] == "data-uid").unwrap();
        assert_eq!(uid["value"]["value"], json!("scene-1"));
    }

    #[test]
    fn empty_scene_list_gives_empty_storyboard() {
        let component = StoryboardSceneConverter::new().convert(&json!([])).unwrap();
        assert!(scene_children(&component).is_empty());
    }

    #[test]
    fn rejects_non_array() {
        let result = StoryboardSceneConverter::new().convert(&json!({"a": 1}));
        assert!(matches!(result, Err(SceneError::NotAnArray)));
    }

    #[test]
    fn rejects_malformed_scene() {
        let result = StoryboardSceneConverter::new().convert(&json!([{"uid": 5}]));
        assert!(matches!(result, Err(SceneError::InvalidScene { index: 0, .. })));
    }
}
