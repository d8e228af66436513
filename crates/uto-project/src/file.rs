//! Current project file model
//!
//! Text files carry their source, a cached parse result and a [`RevisionsState`] telling which of
//! the two is authoritative. Image, asset and directory entries are kept as opaque JSON.

use im::Vector;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ModelError;
use crate::serde_util::{lenient_timestamp, type_tag, Tagged};
use crate::tree::ContentEntry;

/// Wire tag of a text file
pub const TEXT_FILE_TYPE: &str = "TEXT_FILE";

/// Wire tag of a directory entry
pub const DIRECTORY_TYPE: &str = "DIRECTORY";

/// Which representation of a text file is ahead of the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevisionsState {
    /// The parsed model has edits not yet printed to code
    ParsedAhead,
    /// The code has edits not yet parsed
    CodeAhead,
    /// Both agree
    BothMatch,
}

/// Successful parse of a text file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSuccess {
    /// Root-level declarations, in source order
    #[serde(default)]
    pub top_level_elements: Vector<Value>,
    /// Imports, highlight bounds and everything else the parser records
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Failed parse of a text file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParseFailure {
    /// Diagnostics and error messages as written by the parser
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Cached parse result of a text file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParsedTextFile {
    /// Never parsed
    Unparsed,
    /// Parse attempted and failed
    ParseFailure(ParseFailure),
    /// Parse succeeded
    ParseSuccess(ParseSuccess),
}

impl ParsedTextFile {
    /// Check for [`ParsedTextFile::ParseSuccess`]
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::ParseSuccess(_))
    }
}

/// Source text, parse result and revisions state of a text file
///
/// # Invariants
/// - [`RevisionsState::ParsedAhead`] implies a [`ParsedTextFile::ParseSuccess`] result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTextFileContents")]
pub struct TextFileContents {
    code: String,
    parsed: ParsedTextFile,
    revisions_state: RevisionsState,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTextFileContents {
    code: String,
    parsed: ParsedTextFile,
    revisions_state: RevisionsState,
}

impl TryFrom<RawTextFileContents> for TextFileContents {
    type Error = ModelError;

    fn try_from(raw: RawTextFileContents) -> Result<Self, Self::Error> {
        Self::new(raw.code, raw.parsed, raw.revisions_state)
    }
}

impl TextFileContents {
    /// Create contents, checking the revisions invariant
    ///
    /// # Errors
    /// Returns [`ModelError::ParsedAheadWithoutSuccess`] if the parsed model is declared ahead
    /// without a successful parse
    pub fn new(
        code: impl Into<String>,
        parsed: ParsedTextFile,
        revisions_state: RevisionsState,
    ) -> Result<Self, ModelError> {
        if revisions_state == RevisionsState::ParsedAhead && !parsed.is_success() {
            return Err(ModelError::ParsedAheadWithoutSuccess);
        }
        Ok(Self {
            code: code.into(),
            parsed,
            revisions_state,
        })
    }

    /// Unparsed code that the parser has yet to catch up with
    #[inline]
    #[must_use]
    pub fn code_ahead(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            parsed: ParsedTextFile::Unparsed,
            revisions_state: RevisionsState::CodeAhead,
        }
    }

    /// Code and parse result that agree
    #[inline]
    #[must_use]
    pub fn both_match(code: impl Into<String>, parsed: ParsedTextFile) -> Self {
        Self {
            code: code.into(),
            parsed,
            revisions_state: RevisionsState::BothMatch,
        }
    }

    /// Unparsed code with nothing pending
    #[inline]
    #[must_use]
    pub fn unparsed_match(code: impl Into<String>) -> Self {
        Self::both_match(code, ParsedTextFile::Unparsed)
    }

    /// Source text
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Cached parse result
    #[inline]
    #[must_use]
    pub fn parsed(&self) -> &ParsedTextFile {
        &self.parsed
    }

    /// Revisions state
    #[inline]
    #[must_use]
    pub fn revisions_state(&self) -> RevisionsState {
        self.revisions_state
    }
}

/// A text file in the project contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFile {
    /// Current contents
    pub file_contents: TextFileContents,
    /// Contents as of the last save, if they differ
    #[serde(default)]
    pub last_saved_contents: Option<TextFileContents>,
    /// Most recent successful parse
    #[serde(default)]
    pub last_parse_success: Option<ParseSuccess>,
    /// Milliseconds since the epoch of the last revision
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_revised_time: u64,
    /// Fields this model does not interpret
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl TextFile {
    /// Create text file without a cached parse success
    #[inline]
    #[must_use]
    pub fn new(
        file_contents: TextFileContents,
        last_saved_contents: Option<TextFileContents>,
        last_revised_time: u64,
    ) -> Self {
        Self {
            file_contents,
            last_saved_contents,
            last_parse_success: None,
            last_revised_time,
            rest: Map::new(),
        }
    }

    /// Plain code file: unparsed, nothing pending, revised at time zero
    #[must_use]
    pub fn code_file(code: impl Into<String>, last_saved: Option<String>) -> Self {
        Self::new(
            TextFileContents::unparsed_match(code),
            last_saved.map(TextFileContents::unparsed_match),
            0,
        )
    }
}

/// Any entry of a current project's contents
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectFile {
    /// Text file
    Text(TextFile),
    /// Image, asset, directory or an entry this model does not interpret
    Other(Value),
}

impl ProjectFile {
    /// Text file, if this is one
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&TextFile> {
        match self {
            Self::Text(file) => Some(file),
            Self::Other(_) => None,
        }
    }
}

impl From<TextFile> for ProjectFile {
    fn from(file: TextFile) -> Self {
        Self::Text(file)
    }
}

impl ContentEntry for ProjectFile {
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

impl Serialize for ProjectFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(file) => Tagged {
                kind: TEXT_FILE_TYPE,
                inner: file,
            }
            .serialize(serializer),
            Self::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ProjectFile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if type_tag(&value) != Some(TEXT_FILE_TYPE) {
            return Ok(Self::Other(value));
        }
        match TextFile::deserialize(&value) {
            Ok(mut file) => {
                // The tag is written back by the serializer
                file.rest.remove("type");
                Ok(Self::Text(file))
            }
            Err(error) => {
                tracing::warn!(%error, "keeping malformed text file as an opaque entry");
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

    #[test]
    fn parsed_ahead_requires_success() {
        let err = TextFileContents::new("x", ParsedTextFile::Unparsed, RevisionsState::ParsedAhead);
        assert!(matches!(err, Err(ModelError::ParsedAheadWithoutSuccess)));

        let ok = TextFileContents::new(
            "x",
            ParsedTextFile::ParseSuccess(ParseSuccess::default()),
            RevisionsState::ParsedAhead,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn code_ahead_contents() {
        let contents = TextFileContents::code_ahead("x");
        assert_eq!(contents.code(), "x");
        assert_eq!(contents.parsed(), &ParsedTextFile::Unparsed);
        assert_eq!(contents.revisions_state(), RevisionsState::CodeAhead);
    }

    #[test]
    fn text_file_wire_shape() {
        let file = ProjectFile::Text(TextFile::new(TextFileContents::code_ahead("x"), None, 0));
        let value = serde_json::to_value(&file).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "TEXT_FILE",
                "fileContents": {
                    "code": "x",
                    "parsed": {"type": "UNPARSED"},
                    "revisionsState": "CODE_AHEAD"
                },
                "lastSavedContents": null,
                "lastParseSuccess": null,
                "lastRevisedTime": 0
            })
        );

        let back: ProjectFile = serde_json::from_value(value).unwrap();
        assert_eq!(back, file);
    }

    #[test]
    fn unknown_text_file_fields_survive_encode() {
        let value = json!({
            "type": "TEXT_FILE",
            "fileContents": {
                "code": "x",
                "parsed": {"type": "UNPARSED"},
                "revisionsState": "CODE_AHEAD"
            },
            "lastSavedContents": null,
            "lastParseSuccess": null,
            "lastRevisedTime": 5,
            "cursor": {"line": 1}
        });
        let file: ProjectFile = serde_json::from_value(value.clone()).unwrap();
        let text = file.as_text().unwrap();
        assert_eq!(text.rest.get("cursor"), Some(&json!({"line": 1})));
        assert!(!text.rest.contains_key("type"));
        assert_eq!(serde_json::to_value(&file).unwrap(), value);
    }

    #[test]
    fn parse_success_keeps_unknown_fields() {
        let value = json!({
            "type": "PARSE_SUCCESS",
            "imports": {"react": {}},
            "topLevelElements": [{"type": "ARBITRARY_JS_BLOCK"}]
        });
        let parsed: ParsedTextFile = serde_json::from_value(value.clone()).unwrap();
        let ParsedTextFile::ParseSuccess(success) = &parsed else {
            panic!("expected success");
        };
        assert_eq!(success.top_level_elements.len(), 1);
        assert!(success.rest.contains_key("imports"));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), value);
    }

    #[test]
    fn invariant_violation_degrades_to_opaque() {
        let value = json!({
            "type": "TEXT_FILE",
            "fileContents": {
                "code": "x",
                "parsed": {"type": "UNPARSED"},
                "revisionsState": "PARSED_AHEAD"
            },
            "lastRevisedTime": 0
        });
        let file: ProjectFile = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(file, ProjectFile::Other(value));
    }

    #[test]
    fn image_is_opaque_and_directory_is_marked() {
        let image: ProjectFile =
            serde_json::from_value(json!({"type": "IMAGE_FILE", "base64": "AA=="})).unwrap();
        assert!(image.as_text().is_none());
        assert!(image.directory_marker().is_none());

        let dir: ProjectFile = serde_json::from_value(json!({"type": "DIRECTORY"})).unwrap();
        assert_eq!(dir.directory_marker(), Some(json!({"type": "DIRECTORY"})));
    }
}
