//! Legacy file model (document versions 0 through 5)
//!
//! Older editors stored plain code files and "UI JS" files side by side. UI JS files carried a
//! parse result whose payload could hold canvas metadata: a `scenes` array in the oldest saves,
//! later a synthesized storyboard component.

use im::Vector;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::file::{ParseFailure, DIRECTORY_TYPE};
use crate::serde_util::{lenient_timestamp, type_tag, Tagged};
use crate::tree::ContentEntry;

/// Wire tag of a legacy plain code file
pub const CODE_FILE_TYPE: &str = "CODE_FILE";

/// Wire tag of a legacy UI JS file
pub const UI_JS_FILE_TYPE: &str = "UI_JS_FILE";

/// Tag some saves used for the same structure as [`UI_JS_FILE_TYPE`]
pub const LEGACY_TEXT_FILE_TYPE: &str = "TEXT_FILE";

/// Plain code file: literal text plus the text as of the last save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFile {
    /// Current text
    pub file_contents: String,
    /// Text as of the last save
    #[serde(default)]
    pub last_saved_contents: Option<String>,
}

impl CodeFile {
    /// Code file without a saved snapshot
    #[inline]
    #[must_use]
    pub fn new(file_contents: impl Into<String>) -> Self {
        Self {
            file_contents: file_contents.into(),
            last_saved_contents: None,
        }
    }
}

/// Two-sided result as persisted by older editors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Either<L, R> {
    /// Failure side
    Left(L),
    /// Success side
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Success value, if any
    #[inline]
    #[must_use]
    pub fn right(&self) -> Option<&R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }
}

/// Canvas metadata stored next to a parse result
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasMetadata {
    /// Storyboard component synthesized from scenes
    #[serde(
        rename = "utopiaCanvasJSXComponent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub utopia_canvas_jsx_component: Option<Value>,
    /// Scene descriptions of the oldest saves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenes: Option<Value>,
    /// Anything else recorded with the metadata
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Successful parse payload of a legacy UI JS file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyParseSuccess {
    /// Source text the payload was parsed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Root-level declarations, in source order
    #[serde(default)]
    pub top_level_elements: Vector<Value>,
    /// Canvas metadata slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_metadata: Option<Either<Value, CanvasMetadata>>,
    /// Set once old scene metadata has been folded into the element list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_contained_old_scene_metadata: Option<bool>,
    /// Imports and everything else the parser recorded
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Parse result of a legacy UI JS file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyParseResult {
    /// Parsed successfully
    ParseSuccess {
        /// Payload
        value: LegacyParseSuccess,
    },
    /// Parse failed
    ParseFailure(ParseFailure),
    /// Never parsed
    Unparsed,
}

/// Wire tag a UI JS file was saved under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UiJsTag {
    /// [`UI_JS_FILE_TYPE`]
    #[default]
    #[serde(rename = "UI_JS_FILE")]
    UiJs,
    /// [`LEGACY_TEXT_FILE_TYPE`]
    #[serde(rename = "TEXT_FILE")]
    TextFile,
}

impl UiJsTag {
    /// Tag as written on the wire
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UiJs => UI_JS_FILE_TYPE,
            Self::TextFile => LEGACY_TEXT_FILE_TYPE,
        }
    }
}

/// Legacy UI JS file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiJsFile {
    /// Tag the file was saved under
    #[serde(rename = "type", default)]
    pub tag: UiJsTag,
    /// Parse result, including the source text on success
    pub file_contents: LegacyParseResult,
    /// Parse result as of the last save
    #[serde(default)]
    pub last_saved_contents: Option<Value>,
    /// Milliseconds since the epoch of the last revision
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_revised_time: u64,
    /// Fields this model does not interpret
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl UiJsFile {
    /// Successful parse payload, if any
    #[inline]
    #[must_use]
    pub fn parse_success(&self) -> Option<&LegacyParseSuccess> {
        match &self.file_contents {
            LegacyParseResult::ParseSuccess { value } => Some(value),
            _ => None,
        }
    }

    /// Copy of this file with a new parse success payload
    #[must_use]
    pub fn with_parse_success(&self, value: LegacyParseSuccess) -> Self {
        Self {
            file_contents: LegacyParseResult::ParseSuccess { value },
            ..self.clone()
        }
    }
}

/// Any entry of a legacy project's contents
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyFile {
    /// Plain code file
    Code(CodeFile),
    /// UI JS file with a parse result
    UiJs(UiJsFile),
    /// Directory, image, asset, or an entry this model does not interpret
    Other(Value),
}

impl LegacyFile {
    /// UI JS file, if this is one
    #[inline]
    #[must_use]
    pub fn as_ui_js(&self) -> Option<&UiJsFile> {
        match self {
            Self::UiJs(file) => Some(file),
            _ => None,
        }
    }

    /// Code file, if this is one
    #[inline]
    #[must_use]
    pub fn as_code(&self) -> Option<&CodeFile> {
        match self {
            Self::Code(file) => Some(file),
            _ => None,
        }
    }

    /// Wire tag of this entry, if it has one
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Code(_) => Some(CODE_FILE_TYPE),
            Self::UiJs(file) => Some(file.tag.as_str()),
            Self::Other(value) => type_tag(value),
        }
    }
}

impl ContentEntry for LegacyFile {
    fn directory_marker(&self) -> Option<Value> {
        match self {
            Self::Other(value) if type_tag(value) == Some(DIRECTORY_TYPE) => Some(value.clone()),
            _ => None,
        }
    }

    fn from_directory_marker(marker: Value) -> Self {
        Self::Other(marker)
    }
}

impl Serialize for LegacyFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Code(file) => Tagged {
                kind: CODE_FILE_TYPE,
                inner: file,
            }
            .serialize(serializer),
            Self::UiJs(file) => file.serialize(serializer),
            Self::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for LegacyFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let decoded = match type_tag(&value) {
            Some(CODE_FILE_TYPE) => CodeFile::deserialize(&value).map(Self::Code),
            Some(UI_JS_FILE_TYPE | LEGACY_TEXT_FILE_TYPE) => {
                UiJsFile::deserialize(&value).map(Self::UiJs)
            }
            _ => return Ok(Self::Other(value)),
        };
        match decoded {
            Ok(file) => Ok(file),
            Err(error) => {
                tracing::warn!(%error, kind = ?type_tag(&value), "keeping malformed legacy file as an opaque entry");
                Ok(Self::Other(value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ui_js_value() -> Value {
        json!({
            "type": "UI_JS_FILE",
            "fileContents": {
                "type": "PARSE_SUCCESS",
                "value": {
                    "code": "export var App = 1",
                    "imports": {},
                    "topLevelElements": [{"name": "App"}],
                    "canvasMetadata": {
                        "type": "RIGHT",
                        "value": {"scenes": [{"uid": "scene-0"}]}
                    }
                }
            },
            "lastSavedContents": null,
            "lastRevisedTime": 1500
        })
    }

    #[test]
    fn decodes_ui_js_file() {
        let file: LegacyFile = serde_json::from_value(ui_js_value()).unwrap();
        let ui_js = file.as_ui_js().expect("ui js file");
        let success = ui_js.parse_success().expect("parse success");
        assert_eq!(success.code.as_deref(), Some("export var App = 1"));
        assert_eq!(success.top_level_elements.len(), 1);
        assert!(success.rest.contains_key("imports"));
        let metadata = success.canvas_metadata.as_ref().and_then(Either::right).unwrap();
        assert!(metadata.scenes.is_some());
        assert!(metadata.utopia_canvas_jsx_component.is_none());
        assert_eq!(ui_js.last_revised_time, 1500);
    }

    #[test]
    fn ui_js_file_survives_encode() {
        let file: LegacyFile = serde_json::from_value(ui_js_value()).unwrap();
        assert_eq!(serde_json::to_value(&file).unwrap(), ui_js_value());
    }

    #[test]
    fn text_file_tag_is_read_as_ui_js_and_kept() {
        let mut value = ui_js_value();
        value["type"] = json!("TEXT_FILE");
        let file: LegacyFile = serde_json::from_value(value.clone()).unwrap();
        assert!(file.as_ui_js().is_some());
        assert_eq!(file.kind(), Some(LEGACY_TEXT_FILE_TYPE));
        assert_eq!(serde_json::to_value(&file).unwrap(), value);
    }

    #[test]
    fn unknown_ui_js_fields_survive_encode() {
        let mut value = ui_js_value();
        value["lastOpened"] = json!({"line": 3});
        let file: LegacyFile = serde_json::from_value(value.clone()).unwrap();
        let ui_js = file.as_ui_js().unwrap();
        assert_eq!(ui_js.tag, UiJsTag::UiJs);
        assert_eq!(ui_js.rest.get("lastOpened"), Some(&json!({"line": 3})));
        assert!(!ui_js.rest.contains_key("type"));
        assert_eq!(serde_json::to_value(&file).unwrap(), value);
    }

    #[test]
    fn code_file_round_trip() {
        let value = json!({"type": "CODE_FILE", "fileContents": "{}", "lastSavedContents": null});
        let file: LegacyFile = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(file.as_code(), Some(&CodeFile::new("{}")));
        assert_eq!(serde_json::to_value(&file).unwrap(), value);
    }

    #[test]
    fn malformed_code_file_is_opaque() {
        let value = json!({"type": "CODE_FILE", "fileContents": 42});
        let file: LegacyFile = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(file, LegacyFile::Other(value));
    }

    #[test]
    fn left_canvas_metadata_has_no_right() {
        let either: Either<Value, CanvasMetadata> =
            serde_json::from_value(json!({"type": "LEFT", "value": "broken"})).unwrap();
        assert!(either.right().is_none());
    }

    #[test]
    fn empty_canvas_metadata_encodes_as_empty_object() {
        let either: Either<Value, CanvasMetadata> = Either::Right(CanvasMetadata::default());
        assert_eq!(
            serde_json::to_value(&either).unwrap(),
            json!({"type": "RIGHT", "value": {}})
        );
    }
}
