//! Page entity - one node of the content tree as stored on disk

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

fn default_true() -> bool {
    true
}

/// A content page file (`content/**/*.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Display title
    #[serde(default)]
    pub title: String,

    /// Whether the page carries the design field set
    #[serde(default = "default_true")]
    pub design: bool,

    /// Roles allowed to view the page (empty = public)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub view_roles: Vec<String>,

    /// Raw design field values, keyed by field name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, JsonValue>,
}

impl Page {
    /// Create a design-capable, public page with no field values
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            design: true,
            view_roles: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with_field(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Builder-style view restriction
    pub fn with_view_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.view_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style capability toggle
    pub fn without_design(mut self) -> Self {
        self.design = false;
        self
    }
}
