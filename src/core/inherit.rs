//! Smart inheritance - nearest-ancestor resolution of design fields
//!
//! Every design field is resolved independently: the first node in the
//! ancestor chain (queried node first, root last) that the actor may view,
//! that carries the design capability and that holds a meaningful value
//! wins. `color_schema` goes one step further and resolves each color key
//! on its own, so a page can override a single color and inherit the rest.
//!
//! Nothing here fails on bad data. Unreadable nodes are skipped, malformed
//! values count as unset and unserializable values become `null`; only the
//! lookup of the queried node itself can return an error.

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::core::content::{Actor, ContentError, ContentRepository};
use crate::core::fields::{
    FieldDescriptor, FieldValue, ImageRef, COLOR_KEYS, COLOR_SCHEMA, DESIGN_FIELDS, VIEW_TYPE,
};
use crate::core::node::{DesignNode, SourceRef};

/// Behavior namespace served by [`query`]
pub const DESIGN_SCHEMA_BEHAVIOR: &str = "lunasites.behaviors.design_schema.IDesignSchema";

/// Per-field provenance, with per-key detail for the color map
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldSources {
    #[serde(flatten)]
    pub fields: BTreeMap<String, SourceRef>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub color_schema_details: BTreeMap<String, SourceRef>,
}

/// Merged design configuration for one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    /// Field name to resolved value; every design field is present
    pub data: BTreeMap<String, JsonValue>,

    /// Advisory single source: the first field's source, or the queried node
    pub from: SourceRef,

    pub field_sources: FieldSources,
}

/// Resolves design fields for one actor against one repository
pub struct Resolver<'a, R: ContentRepository> {
    repo: &'a R,
    actor: &'a Actor,
}

impl<'a, R: ContentRepository> Resolver<'a, R> {
    pub fn new(repo: &'a R, actor: &'a Actor) -> Self {
        Self { repo, actor }
    }

    /// Whether a chain node may contribute values at all
    fn contributes(&self, node: &R::Node) -> bool {
        match self.repo.can_view(self.actor, node) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!(node = node.url(), "skipped: not viewable");
                return false;
            }
            Err(e) => {
                tracing::debug!(node = node.url(), error = %e, "skipped: permission check failed");
                return false;
            }
        }
        if !node.has_design_capability() {
            tracing::debug!(node = node.url(), "skipped: no design capability");
            return false;
        }
        true
    }

    /// Nearest meaningful value of `field` along `chain`
    pub fn find_closest_value(
        &self,
        chain: &[&'a R::Node],
        field: &FieldDescriptor,
    ) -> Option<(FieldValue, &'a R::Node)> {
        for &node in chain {
            if !self.contributes(node) {
                continue;
            }
            match node.field(field.name) {
                Ok(value) if value.is_meaningful() => {
                    tracing::debug!(field = field.name, node = node.url(), "value found");
                    return Some((value, node));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(field = field.name, node = node.url(), error = %e, "unreadable value");
                }
            }
        }
        None
    }

    /// Resolve each color key independently along `chain`.
    ///
    /// Keys that no node defines are left out of both maps.
    pub fn resolve_colors(
        &self,
        chain: &[&'a R::Node],
        keys: &[&str],
    ) -> (BTreeMap<String, String>, BTreeMap<String, SourceRef>) {
        let mut colors = BTreeMap::new();
        let mut sources = BTreeMap::new();

        for &key in keys {
            for &node in chain {
                if !self.contributes(node) {
                    continue;
                }
                let Ok(FieldValue::Map(map)) = node.field(COLOR_SCHEMA) else {
                    continue;
                };
                if let Some(color) = map.get(key).filter(|c| !c.trim().is_empty()) {
                    colors.insert(key.to_string(), color.clone());
                    sources.insert(key.to_string(), SourceRef::of(node));
                    break;
                }
            }
        }

        (colors, sources)
    }

    /// Resolve every design field for `node`
    pub fn resolve(&self, node: &'a R::Node) -> Result<ResolutionResult, ContentError> {
        let chain = self.repo.ancestor_chain(node)?;

        let mut data = BTreeMap::new();
        let mut sources = FieldSources::default();
        let mut first_source = None;

        for field in DESIGN_FIELDS.iter().filter(|f| f.inherits) {
            match self.find_closest_value(&chain, field) {
                Some((value, source)) => {
                    data.insert(field.name.to_string(), serialize_value(&value, field, source));
                    let source_ref = SourceRef::of(source);
                    first_source.get_or_insert_with(|| source_ref.clone());
                    sources.fields.insert(field.name.to_string(), source_ref);
                }
                None => {
                    data.insert(field.name.to_string(), field.default_value());
                }
            }
        }

        // Per-key colors always replace the whole-map value
        let (colors, color_sources) = self.resolve_colors(&chain, &COLOR_KEYS);
        data.insert(
            COLOR_SCHEMA.to_string(),
            serde_json::to_value(colors).unwrap_or(JsonValue::Null),
        );
        sources.color_schema_details = color_sources;

        data.insert(VIEW_TYPE.to_string(), self.own_view_type(node));

        Ok(ResolutionResult {
            data,
            from: first_source.unwrap_or_else(|| SourceRef::of(node)),
            field_sources: sources,
        })
    }

    /// `view_type` never inherits: only the queried node's own value counts
    fn own_view_type(&self, node: &R::Node) -> JsonValue {
        if !node.has_design_capability() {
            return JsonValue::Null;
        }
        match node.field(VIEW_TYPE) {
            Ok(value) if value.is_meaningful() => value.to_json().unwrap_or(JsonValue::Null),
            _ => JsonValue::Null,
        }
    }
}

/// JSON form of a resolved value.
///
/// Images become a download descriptor rooted at the node the value came
/// from; anything that cannot be converted becomes `null`.
pub fn serialize_value<N: DesignNode + ?Sized>(
    value: &FieldValue,
    field: &FieldDescriptor,
    source: &N,
) -> JsonValue {
    match value {
        FieldValue::Image(image) => image_descriptor(image, field.name, source),
        other => other.to_json().unwrap_or(JsonValue::Null),
    }
}

fn image_descriptor<N: DesignNode + ?Sized>(
    image: &ImageRef,
    field_name: &str,
    source: &N,
) -> JsonValue {
    let Some(filename) = image.filename.as_deref() else {
        return JsonValue::Null;
    };
    serde_json::json!({
        "@type": "Image",
        "filename": filename,
        "content-type": image.content_type.as_deref().unwrap_or(""),
        "size": image.size,
        "download": format!("{}/@@download/{}", source.url(), field_name),
        "scales": {},
    })
}

/// Resolve the requested behavior namespaces for the page at `path`.
///
/// `behaviors` is a comma-separated list; unsupported namespaces are
/// omitted and an empty list yields an empty map.
pub fn query<R: ContentRepository>(
    repo: &R,
    actor: &Actor,
    path: &str,
    behaviors: &str,
) -> Result<BTreeMap<String, ResolutionResult>, ContentError> {
    let mut result = BTreeMap::new();

    let requested: Vec<&str> = behaviors
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect();
    if requested.is_empty() {
        return Ok(result);
    }

    let node = repo.lookup(path)?;
    if !repo.can_view(actor, node)? {
        return Err(ContentError::Forbidden(path.to_string()));
    }

    let resolver = Resolver::new(repo, actor);
    for behavior in requested {
        if behavior == DESIGN_SCHEMA_BEHAVIOR {
            result.insert(behavior.to_string(), resolver.resolve(node)?);
        } else {
            tracing::debug!(behavior, "unsupported behavior, omitted");
        }
    }

    Ok(result)
}
