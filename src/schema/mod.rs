//! Schema system - embedded JSON Schemas and page validation

pub mod validator;

pub use validator::{SchemaLoadError, ValidationError, Validator};

use rust_embed::RustEmbed;

/// File name of the page schema
pub const PAGE_SCHEMA: &str = "page.schema.json";

#[derive(RustEmbed)]
#[folder = "schemas/"]
struct SchemaAssets;

/// Text of an embedded schema
pub fn embedded_schema(name: &str) -> Option<String> {
    let file = SchemaAssets::get(name)?;
    String::from_utf8(file.data.into_owned()).ok()
}

/// Names of all embedded schemas
pub fn schema_names() -> Vec<String> {
    SchemaAssets::iter().map(|name| name.into_owned()).collect()
}
