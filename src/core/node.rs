//! Content nodes and the capability interface the resolver reads through

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::core::fields::{descriptor, FieldError, FieldValue};
use crate::entities::Page;

/// Read-only view of a content node, as seen by design inheritance
pub trait DesignNode {
    /// Absolute URL identifying the node
    fn url(&self) -> &str;

    /// Display title
    fn title(&self) -> &str;

    /// Whether the node participates in the design field set
    fn has_design_capability(&self) -> bool;

    /// Read a design field; absent values are `FieldValue::Absent`
    fn field(&self, name: &str) -> Result<FieldValue, FieldError>;
}

/// Provenance descriptor pointing at a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(rename = "@id")]
    pub id: String,
    pub title: String,
}

impl SourceRef {
    pub fn of<N: DesignNode + ?Sized>(node: &N) -> Self {
        Self {
            id: node.url().to_string(),
            title: node.title().to_string(),
        }
    }
}

/// A node of the on-disk content tree
#[derive(Debug, Clone)]
pub struct ContentNode {
    /// Site-relative path, always starting with `/`
    pub path: String,
    /// Absolute URL (site base URL + path)
    pub url: String,
    pub page: Page,
}

impl ContentNode {
    pub fn new(path: impl Into<String>, url: impl Into<String>, page: Page) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
            page,
        }
    }

    /// Raw stored value of a field, if any
    pub fn raw_field(&self, name: &str) -> Option<&JsonValue> {
        self.page.fields.get(name)
    }
}

impl DesignNode for ContentNode {
    fn url(&self) -> &str {
        &self.url
    }

    fn title(&self) -> &str {
        &self.page.title
    }

    fn has_design_capability(&self) -> bool {
        self.page.design
    }

    fn field(&self, name: &str) -> Result<FieldValue, FieldError> {
        let desc = descriptor(name).ok_or_else(|| FieldError::Unknown(name.to_string()))?;
        match self.raw_field(name) {
            Some(raw) => FieldValue::from_raw(desc, raw),
            None => Ok(FieldValue::Absent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_field_is_absent() {
        let node = ContentNode::new("/", "http://site", Page::new("Home"));
        assert_eq!(node.field("navbar_width"), Ok(FieldValue::Absent));
    }

    #[test]
    fn test_unknown_field_errors() {
        let node = ContentNode::new("/", "http://site", Page::new("Home"));
        assert_eq!(node.field("subjects"), Err(FieldError::Unknown("subjects".into())));
    }

    #[test]
    fn test_source_ref_serializes_with_at_id() {
        let node = ContentNode::new("/about", "http://site/about", Page::new("About"));
        let value = serde_json::to_value(SourceRef::of(&node)).unwrap();
        assert_eq!(value, json!({"@id": "http://site/about", "title": "About"}));
    }
}
