//! Design field table and the tagged field values read from content nodes
//!
//! The set of inheritable design fields is fixed. Each field has a kind
//! that decides how a raw stored value is read, when it counts as set, and
//! which default fills it when no node in the chain provides one.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use thiserror::Error;

/// Shape of a design field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain string (widths, view type)
    Text,
    /// Boolean toggle
    Flag,
    /// Ordered list of JSON items (header tool links)
    List,
    /// String-keyed map of strings (color schema)
    Map,
    /// Reference to a stored image
    Image,
    /// Opaque rich-text document
    Rich,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldKind::Text => write!(f, "string"),
            FieldKind::Flag => write!(f, "boolean"),
            FieldKind::List => write!(f, "list"),
            FieldKind::Map => write!(f, "string map"),
            FieldKind::Image => write!(f, "image"),
            FieldKind::Rich => write!(f, "rich text"),
        }
    }
}

/// A named, typed design field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// False for fields that are only ever read from the queried node
    pub inherits: bool,
}

impl FieldDescriptor {
    const fn inherited(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            inherits: true,
        }
    }

    /// Value used when no node in the chain provides the field
    pub fn default_value(&self) -> JsonValue {
        match self.kind {
            FieldKind::Map => JsonValue::Object(serde_json::Map::new()),
            FieldKind::List => JsonValue::Array(Vec::new()),
            FieldKind::Flag => JsonValue::Bool(false),
            FieldKind::Text | FieldKind::Image | FieldKind::Rich => JsonValue::Null,
        }
    }
}

/// Name of the per-key inherited color map field
pub const COLOR_SCHEMA: &str = "color_schema";

/// Name of the non-inheriting view type field
pub const VIEW_TYPE: &str = "view_type";

/// Every design field, in resolution order
pub const DESIGN_FIELDS: [FieldDescriptor; 10] = [
    FieldDescriptor::inherited(COLOR_SCHEMA, FieldKind::Map),
    FieldDescriptor::inherited("navbar_width", FieldKind::Text),
    FieldDescriptor::inherited("container_width", FieldKind::Text),
    FieldDescriptor::inherited("tools_header", FieldKind::List),
    FieldDescriptor::inherited("logo_image", FieldKind::Image),
    FieldDescriptor::inherited("logo_text", FieldKind::Rich),
    FieldDescriptor::inherited("logo_text_bold", FieldKind::Flag),
    FieldDescriptor::inherited("hide_login_button", FieldKind::Flag),
    FieldDescriptor::inherited("hide_search_button", FieldKind::Flag),
    FieldDescriptor {
        name: VIEW_TYPE,
        kind: FieldKind::Text,
        inherits: false,
    },
];

/// Color keys resolved independently inside `color_schema`
pub const COLOR_KEYS: [&str; 13] = [
    "background_color",
    "primary_color",
    "secondary_color",
    "text_color",
    "accent_color",
    "header_bg_color",
    "header_text_color",
    "toolbar_color",
    "toolbar_font_color",
    "toolbar_border_color",
    "toolbar_border_thickness",
    "dropdown_color",
    "dropdown_font_color",
];

/// Look up a design field by name
pub fn descriptor(name: &str) -> Option<&'static FieldDescriptor> {
    DESIGN_FIELDS.iter().find(|d| d.name == name)
}

/// Stored image reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default, alias = "content-type")]
    pub content_type: Option<String>,

    #[serde(default)]
    pub size: u64,
}

/// A design field value as read from a node
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Absent,
    Text(String),
    Flag(bool),
    List(Vec<JsonValue>),
    Map(BTreeMap<String, String>),
    Image(ImageRef),
    Rich(JsonValue),
}

/// Failure reading a design field off a node
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("'{0}' is not a design field")]
    Unknown(String),

    #[error("field '{field}' does not hold a {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: FieldKind,
    },
}

impl FieldValue {
    /// Read a raw stored value as the descriptor's kind
    pub fn from_raw(desc: &FieldDescriptor, raw: &JsonValue) -> Result<Self, FieldError> {
        if raw.is_null() {
            return Ok(FieldValue::Absent);
        }

        let mismatch = || FieldError::TypeMismatch {
            field: desc.name,
            expected: desc.kind,
        };

        match desc.kind {
            FieldKind::Text => raw
                .as_str()
                .map(|s| FieldValue::Text(s.to_string()))
                .ok_or_else(mismatch),
            FieldKind::Flag => raw.as_bool().map(FieldValue::Flag).ok_or_else(mismatch),
            FieldKind::List => raw
                .as_array()
                .map(|items| FieldValue::List(items.clone()))
                .ok_or_else(mismatch),
            FieldKind::Map => {
                let obj = raw.as_object().ok_or_else(mismatch)?;
                let mut map = BTreeMap::new();
                for (key, value) in obj {
                    // YAML turns `thickness: 2` into a number; nested
                    // entries are not colors and are left out per key
                    let text = match value {
                        JsonValue::String(s) => s.clone(),
                        JsonValue::Number(n) => n.to_string(),
                        JsonValue::Bool(b) => b.to_string(),
                        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => continue,
                    };
                    map.insert(key.clone(), text);
                }
                Ok(FieldValue::Map(map))
            }
            FieldKind::Image => {
                if !raw.is_object() {
                    return Err(mismatch());
                }
                serde_json::from_value::<ImageRef>(raw.clone())
                    .map(FieldValue::Image)
                    .map_err(|_| mismatch())
            }
            FieldKind::Rich => Ok(FieldValue::Rich(raw.clone())),
        }
    }

    /// Whether this value counts as set for inheritance purposes.
    ///
    /// Known limitation: a boolean has no unset state distinct from `false`,
    /// so a node that stores `false` stops the walk for that field even if
    /// the editor meant "no preference".
    pub fn is_meaningful(&self) -> bool {
        match self {
            FieldValue::Absent => false,
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::Flag(_) => true,
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Map(map) => map.values().any(|v| !v.trim().is_empty()),
            FieldValue::Image(_) => true,
            FieldValue::Rich(value) => json_is_meaningful(value),
        }
    }

    /// Plain JSON form of the value
    pub fn to_json(&self) -> Result<JsonValue, serde_json::Error> {
        match self {
            FieldValue::Absent => Ok(JsonValue::Null),
            FieldValue::Text(s) => Ok(JsonValue::String(s.clone())),
            FieldValue::Flag(b) => Ok(JsonValue::Bool(*b)),
            FieldValue::List(items) => Ok(JsonValue::Array(items.clone())),
            FieldValue::Map(map) => serde_json::to_value(map),
            FieldValue::Image(image) => serde_json::to_value(image),
            FieldValue::Rich(value) => Ok(value.clone()),
        }
    }
}

/// Same rules as [`FieldValue::is_meaningful`], applied to an untyped value
fn json_is_meaningful(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::String(s) => !s.trim().is_empty(),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(map) => map.values().any(|v| match v {
            JsonValue::Null => false,
            JsonValue::String(s) => !s.trim().is_empty(),
            JsonValue::Bool(b) => *b,
            JsonValue::Array(items) => !items.is_empty(),
            JsonValue::Object(inner) => !inner.is_empty(),
            JsonValue::Number(_) => true,
        }),
        JsonValue::Bool(_) | JsonValue::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(name: &str) -> &'static FieldDescriptor {
        descriptor(name).unwrap()
    }

    #[test]
    fn test_field_table_has_unique_names() {
        let mut names: Vec<_> = DESIGN_FIELDS.iter().map(|d| d.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), DESIGN_FIELDS.len());
        assert!(!field(VIEW_TYPE).inherits);
    }

    #[test]
    fn test_defaults_by_kind() {
        assert_eq!(field(COLOR_SCHEMA).default_value(), json!({}));
        assert_eq!(field("tools_header").default_value(), json!([]));
        assert_eq!(field("navbar_width").default_value(), JsonValue::Null);
        assert_eq!(field("logo_image").default_value(), JsonValue::Null);
        assert_eq!(field("hide_login_button").default_value(), json!(false));
    }

    #[test]
    fn test_strings_trimmed() {
        assert!(!FieldValue::Text("   ".into()).is_meaningful());
        assert!(FieldValue::Text(" wide ".into()).is_meaningful());
    }

    #[test]
    fn test_map_with_only_blank_values_is_not_meaningful() {
        let value = FieldValue::from_raw(field(COLOR_SCHEMA), &json!({"primary_color": ""})).unwrap();
        assert!(!value.is_meaningful());

        let value =
            FieldValue::from_raw(field(COLOR_SCHEMA), &json!({"primary_color": "#111"})).unwrap();
        assert!(value.is_meaningful());
    }

    #[test]
    fn test_false_flag_is_meaningful() {
        assert!(FieldValue::Flag(false).is_meaningful());
    }

    #[test]
    fn test_empty_list_is_not_meaningful() {
        assert!(!FieldValue::List(vec![]).is_meaningful());
        assert!(FieldValue::List(vec![json!({"title": "Contact"})]).is_meaningful());
    }

    #[test]
    fn test_null_reads_as_absent() {
        for desc in DESIGN_FIELDS.iter() {
            assert_eq!(FieldValue::from_raw(desc, &JsonValue::Null), Ok(FieldValue::Absent));
        }
    }

    #[test]
    fn test_wrong_shape_is_a_mismatch() {
        let err = FieldValue::from_raw(field("navbar_width"), &json!(42)).unwrap_err();
        assert_eq!(
            err,
            FieldError::TypeMismatch {
                field: "navbar_width",
                expected: FieldKind::Text
            }
        );
        assert!(FieldValue::from_raw(field("tools_header"), &json!("x")).is_err());
        assert!(FieldValue::from_raw(field(COLOR_SCHEMA), &json!(["#fff"])).is_err());
        assert!(FieldValue::from_raw(field("logo_image"), &json!("logo.png")).is_err());
    }

    #[test]
    fn test_map_scalars_become_strings() {
        let value = FieldValue::from_raw(
            field(COLOR_SCHEMA),
            &json!({"toolbar_border_thickness": 2, "primary_color": null}),
        )
        .unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("toolbar_border_thickness".to_string(), "2".to_string());
        assert_eq!(value, FieldValue::Map(expected));
    }

    #[test]
    fn test_map_drops_nested_entries_only() {
        let value = FieldValue::from_raw(
            field(COLOR_SCHEMA),
            &json!({"primary_color": "#111", "gradient_stops": ["#000", "#fff"], "extra": {"a": 1}}),
        )
        .unwrap();
        let mut expected = BTreeMap::new();
        expected.insert("primary_color".to_string(), "#111".to_string());
        assert_eq!(value, FieldValue::Map(expected));

        let only_nested =
            FieldValue::from_raw(field(COLOR_SCHEMA), &json!({"gradient_stops": ["#000"]})).unwrap();
        assert!(!only_nested.is_meaningful());
    }

    #[test]
    fn test_image_reads_either_content_type_spelling() {
        let value = FieldValue::from_raw(
            field("logo_image"),
            &json!({"filename": "logo.png", "content-type": "image/png", "size": 10}),
        )
        .unwrap();
        match value {
            FieldValue::Image(image) => {
                assert_eq!(image.content_type.as_deref(), Some("image/png"));
                assert_eq!(image.size, 10);
            }
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn test_rich_text_uses_json_shape() {
        assert!(!FieldValue::Rich(json!([])).is_meaningful());
        assert!(!FieldValue::Rich(json!({"text": " "})).is_meaningful());
        assert!(FieldValue::Rich(json!([{"type": "p", "children": [{"text": "Luna"}]}])).is_meaningful());
    }
}
