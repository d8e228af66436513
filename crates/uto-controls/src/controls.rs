//! Property control parsing
//!
//! Components describe their props to the inspector with a JSON object keyed by prop name. Each
//! entry must be an object with a known `type`. Entries are parsed independently, so one bad
//! control does not hide the others.

use im::OrdMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kinds of property control the inspector can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlType {
    /// Checkbox
    Boolean,
    /// Colour picker
    Color,
    /// Slot for another component
    #[serde(rename = "componentinstance")]
    ComponentInstance,
    /// Fixed set of literal values
    Enum,
    /// Callback prop
    #[serde(rename = "eventhandler")]
    EventHandler,
    /// Fixed set of expressions
    ExpressionEnum,
    /// Dropdown of expressions
    ExpressionPopuplist,
    /// Collapsible group of controls
    Folder,
    /// Identifier
    Ident,
    /// Numeric input
    Number,
    /// Segmented choice
    Options,
    /// Dropdown
    Popuplist,
    /// Range slider
    Slider,
    /// Text input
    String,
    /// Style editor
    StyleControls,
    /// List of values
    Array,
    /// Object with its own controls
    Object,
    /// One of several controls
    Union,
    /// Two numbers
    Vector2,
    /// Three numbers
    Vector3,
    /// Four numbers
    Vector4,
    /// Raw JavaScript
    Rawjs,
}

impl ControlType {
    /// Parse a wire `type` tag
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        serde_json::from_value(Value::String(tag.to_string())).ok()
    }
}

/// Errors parsing one property control
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlParseError {
    /// Entry is not an object
    #[error("control for `{0}` is not an object")]
    NotAnObject(String),

    /// Entry has no string `type`
    #[error("control for `{0}` has no type")]
    MissingType(String),

    /// Entry has an unrecognized `type`
    #[error("control for `{property}` has unknown type `{tag}`")]
    UnknownType {
        /// Prop name
        property: String,
        /// Tag found
        tag: String,
    },
}

/// A successfully parsed property control
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedControl {
    /// Control kind
    pub control_type: ControlType,
    /// Inspector label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Full description as declared
    pub definition: Map<String, Value>,
}

/// Parse result of every prop of a component, keyed by prop name
pub type ParsedPropertyControls = OrdMap<String, Result<ParsedControl, ControlParseError>>;

/// Parse a component's property controls object
#[must_use]
pub fn parse_property_controls(controls: &Map<String, Value>) -> ParsedPropertyControls {
    controls
        .iter()
        .map(|(property, control)| (property.clone(), parse_control(property, control)))
        .collect()
}

fn parse_control(property: &str, control: &Value) -> Result<ParsedControl, ControlParseError> {
    let definition = control
        .as_object()
        .ok_or_else(|| ControlParseError::NotAnObject(property.to_string()))?;
    let tag = definition
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ControlParseError::MissingType(property.to_string()))?;
    let control_type = ControlType::from_tag(tag).ok_or_else(|| ControlParseError::UnknownType {
        property: property.to_string(),
        tag: tag.to_string(),
    })?;

    Ok(ParsedControl {
        control_type,
        title: definition
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string),
        definition: definition.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn parses_known_controls() {
        let parsed = parse_property_controls(&object(json!({
            "title": {"type": "string", "title": "Title"},
            "size": {"type": "slider", "min": 0, "max": 10},
            "style": {"type": "style-controls"}
        })));
        let title = parsed.get("title").unwrap().as_ref().unwrap();
        assert_eq!(title.control_type, ControlType::String);
        assert_eq!(title.title.as_deref(), Some("Title"));
        assert_eq!(
            parsed.get("size").unwrap().as_ref().unwrap().definition.get("max"),
            Some(&json!(10))
        );
        assert_eq!(
            parsed.get("style").unwrap().as_ref().unwrap().control_type,
            ControlType::StyleControls
        );
    }

    #[test]
    fn failures_are_per_property() {
        let parsed = parse_property_controls(&object(json!({
            "ok": {"type": "boolean"},
            "bad": 3,
            "untyped": {"title": "x"},
            "unknown": {"type": "hologram"}
        })));
        assert!(parsed.get("ok").unwrap().is_ok());
        assert_eq!(
            parsed.get("bad").unwrap(),
            &Err(ControlParseError::NotAnObject("bad".to_string()))
        );
        assert_eq!(
            parsed.get("untyped").unwrap(),
            &Err(ControlParseError::MissingType("untyped".to_string()))
        );
        assert!(matches!(
            parsed.get("unknown").unwrap(),
            Err(ControlParseError::UnknownType { tag, .. }) if tag == "hologram"
        ));
    }

    #[test]
    fn control_type_tags() {
        assert_eq!(ControlType::from_tag("component-instance"), None);
        assert_eq!(
            ControlType::from_tag("componentinstance"),
            Some(ControlType::ComponentInstance)
        );
        assert_eq!(
            ControlType::from_tag("expression-popuplist"),
            Some(ControlType::ExpressionPopuplist)
        );
        assert_eq!(ControlType::from_tag("vector2"), Some(ControlType::Vector2));
    }
}
