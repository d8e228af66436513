//! Persisted project documents
//!
//! Each schema version has its own document shape. [`VersionedDocument`] tags a decoded document
//! with the version it was saved at, so the migration chain can match on variants instead of
//! inspecting shapes at runtime.

use im::OrdMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};

use crate::error::DecodeError;
use crate::file::ProjectFile;
use crate::legacy::LegacyFile;
use crate::serde_util::type_tag;
use crate::tree::{fold_contents_tree, ProjectContentTreeRoot};

/// Latest schema version of a persisted document
pub const CURRENT_PROJECT_VERSION: u32 = 6;

/// Key holding the schema version
pub const PROJECT_VERSION_KEY: &str = "projectVersion";

/// Wire tag of a file tab
pub const OPEN_FILE_TAB_TYPE: &str = "OPEN_FILE_TAB";

/// Flat path → entry contents (versions 0 to 4)
pub type FlatContents = OrdMap<String, LegacyFile>;

/// Tree of legacy entries (version 5)
pub type LegacyContentsTree = ProjectContentTreeRoot<LegacyFile>;

/// Tree of current entries (version 6)
pub type CurrentContents = ProjectContentTreeRoot<ProjectFile>;

/// Document at [`CURRENT_PROJECT_VERSION`]
pub type CurrentDocument = PersistentDocument<CurrentContents>;

/// An editor tab
#[derive(Debug, Clone, PartialEq)]
pub enum EditorTab {
    /// Tab showing a file
    OpenFile {
        /// Path of the file
        filename: String,
    },
    /// Any other tab kind, kept as persisted
    Other(Value),
}

impl EditorTab {
    /// Tab for a file
    #[inline]
    #[must_use]
    pub fn open_file(filename: impl Into<String>) -> Self {
        Self::OpenFile {
            filename: filename.into(),
        }
    }

    /// Tab from a version 0 entry: a bare name is a file tab, anything else is read as a tagged tab
    #[must_use]
    pub fn from_legacy(value: Value) -> Self {
        match value {
            Value::String(filename) => Self::open_file(filename),
            other => Self::from_value(other),
        }
    }

    fn from_value(value: Value) -> Self {
        if type_tag(&value) == Some(OPEN_FILE_TAB_TYPE) {
            if let Some(filename) = value.get("filename").and_then(Value::as_str) {
                return Self::open_file(filename);
            }
        }
        Self::Other(value)
    }

    /// Path of the file shown, if this is a file tab
    #[inline]
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::OpenFile { filename } => Some(filename),
            Self::Other(_) => None,
        }
    }
}

impl Serialize for EditorTab {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::OpenFile { filename } => {
                json!({ "type": OPEN_FILE_TAB_TYPE, "filename": filename }).serialize(serializer)
            }
            Self::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for EditorTab {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// Version 0 document: tabs are bare file names
///
/// Tabs are kept as raw JSON so that a save mixing in tagged tabs still decodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentV0 {
    /// Open file names
    #[serde(default)]
    pub open_files: Vec<Value>,
    /// Selected file name, empty when nothing is selected
    #[serde(default)]
    pub selected_file: Option<Value>,
    /// Flat contents
    #[serde(default)]
    pub project_contents: FlatContents,
    /// Remaining persisted state, carried verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document from version 1 on, generic over its contents representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "C: Deserialize<'de> + Default")
)]
pub struct PersistentDocument<C> {
    /// Open tabs, in display order
    #[serde(default)]
    pub open_files: Vec<EditorTab>,
    /// Selected tab
    #[serde(default)]
    pub selected_file: Option<EditorTab>,
    /// Project contents
    #[serde(default)]
    pub project_contents: C,
    /// Remaining persisted state, carried verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<C> PersistentDocument<C> {
    /// Same document with different contents
    #[must_use]
    pub fn with_contents<D>(self, project_contents: D) -> PersistentDocument<D> {
        PersistentDocument {
            open_files: self.open_files,
            selected_file: self.selected_file,
            project_contents,
            extra: self.extra,
        }
    }
}

/// A decoded document tagged with the version it was persisted at
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedDocument {
    /// Bare-string tabs, flat contents
    V0(DocumentV0),
    /// Tagged tabs, flat contents, canvas metadata may hold scenes
    V1(PersistentDocument<FlatContents>),
    /// Canvas metadata holds a synthesized component
    V2(PersistentDocument<FlatContents>),
    /// Canvas metadata folded into top-level elements
    V3(PersistentDocument<FlatContents>),
    /// Build config paths point into `public/`
    V4(PersistentDocument<FlatContents>),
    /// Contents as a tree of legacy entries
    V5(PersistentDocument<LegacyContentsTree>),
    /// Current shape
    V6(CurrentDocument),
}

impl VersionedDocument {
    /// Schema version of this document
    #[must_use]
    pub fn version(&self) -> u32 {
        match self {
            Self::V0(_) => 0,
            Self::V1(_) => 1,
            Self::V2(_) => 2,
            Self::V3(_) => 3,
            Self::V4(_) => 4,
            Self::V5(_) => 5,
            Self::V6(_) => 6,
        }
    }

    /// Check whether the document is at [`CURRENT_PROJECT_VERSION`]
    #[inline]
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.version() == CURRENT_PROJECT_VERSION
    }

    /// Decode a persisted document
    ///
    /// A missing or null `projectVersion` means version 0.
    ///
    /// # Errors
    /// Returns error if the version is invalid or unknown, or the body does not match the shape
    /// of its version
    pub fn from_json(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(mut map) = value else {
            return Err(DecodeError::NotAnObject);
        };
        let version = read_version(map.remove(PROJECT_VERSION_KEY))?;
        let body = Value::Object(map);
        let shape = move |source: serde_json::Error| DecodeError::Shape { version, source };

        let document = match version {
            0 => Self::V0(serde_json::from_value(body).map_err(shape)?),
            1 => Self::V1(serde_json::from_value(body).map_err(shape)?),
            2 => Self::V2(serde_json::from_value(body).map_err(shape)?),
            3 => Self::V3(serde_json::from_value(body).map_err(shape)?),
            4 => Self::V4(serde_json::from_value(body).map_err(shape)?),
            5 => Self::V5(serde_json::from_value(body).map_err(shape)?),
            6 => Self::V6(serde_json::from_value(body).map_err(shape)?),
            other => return Err(DecodeError::UnsupportedVersion(u64::from(other))),
        };
        tracing::debug!(version, "decoded persisted document");
        Ok(document)
    }

    /// Decode a persisted document from JSON text
    ///
    /// # Errors
    /// Returns error if the text is not JSON or [`Self::from_json`] fails
    pub fn from_json_str(text: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(text).map_err(DecodeError::Json)?;
        Self::from_json(value)
    }

    /// Encode to the persisted JSON shape, `projectVersion` included
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn to_json(&self) -> Result<Value, DecodeError> {
        let body = match self {
            Self::V0(document) => serde_json::to_value(document),
            Self::V1(document) | Self::V2(document) | Self::V3(document) | Self::V4(document) => {
                serde_json::to_value(document)
            }
            Self::V5(document) => serde_json::to_value(document),
            Self::V6(document) => serde_json::to_value(document),
        };
        let mut body = body.map_err(DecodeError::Encode)?;
        if let Value::Object(map) = &mut body {
            map.insert(PROJECT_VERSION_KEY.to_string(), json!(self.version()));
        }
        Ok(body)
    }

    /// Every path held in the contents, directories included, in path order
    #[must_use]
    pub fn content_paths(&self) -> Vec<String> {
        match self {
            Self::V0(document) => document.project_contents.keys().cloned().collect(),
            Self::V1(document) | Self::V2(document) | Self::V3(document) | Self::V4(document) => {
                document.project_contents.keys().cloned().collect()
            }
            Self::V5(document) => tree_paths(&document.project_contents),
            Self::V6(document) => tree_paths(&document.project_contents),
        }
    }
}

impl From<CurrentDocument> for VersionedDocument {
    fn from(document: CurrentDocument) -> Self {
        Self::V6(document)
    }
}

fn tree_paths<F: Clone>(root: &ProjectContentTreeRoot<F>) -> Vec<String> {
    let mut paths = fold_contents_tree(root, Vec::new(), |mut acc, node| {
        acc.push(node.full_path().to_string());
        acc
    });
    paths.sort();
    paths
}

fn read_version(value: Option<Value>) -> Result<u32, DecodeError> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => match number.as_u64() {
            Some(version) if version <= u64::from(CURRENT_PROJECT_VERSION) => {
                u32::try_from(version).map_err(|_| DecodeError::UnsupportedVersion(version))
            }
            Some(version) => Err(DecodeError::UnsupportedVersion(version)),
            None => Err(DecodeError::InvalidVersion(Value::Number(number))),
        },
        Some(other) => Err(DecodeError::InvalidVersion(other)),
    }
}
