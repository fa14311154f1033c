//! Site color schema service - current schema, stored presets, suggestions

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::core::color::{is_valid_color, suggestions_for, ColorSuggestion, DEFAULT_PRIMARY};
use crate::core::registry::Registry;
use crate::core::service::ServiceError;
use crate::entities::ColorPreset;

pub const COLOR_SCHEMA_KEY: &str = "lunasites.color_schema";
pub const COLOR_PRESETS_KEY: &str = "lunasites.color_schema_presets";

pub type ColorMap = BTreeMap<String, String>;

#[derive(Debug, Serialize)]
pub struct ColorSchemaView {
    pub current_schema: ColorMap,
    pub presets: Vec<ColorPreset>,
    pub suggestions: Vec<ColorSuggestion>,
}

#[derive(Debug, Serialize)]
pub struct ColorSchemaUpdated {
    pub success: bool,
    pub updated_schema: ColorMap,
    pub suggestions: Vec<ColorSuggestion>,
}

#[derive(Debug, Serialize)]
pub struct PresetApplied {
    pub success: bool,
    pub applied_preset: String,
    pub schema: ColorMap,
    pub suggestions: Vec<ColorSuggestion>,
}

pub struct ColorSchemaService<'a> {
    registry: &'a mut Registry,
}

impl<'a> ColorSchemaService<'a> {
    pub fn new(registry: &'a mut Registry) -> Self {
        Self { registry }
    }

    /// Current schema, stored presets and suggestions for the schema
    pub fn get(&self) -> ColorSchemaView {
        let current_schema: ColorMap = self.registry.get_or(COLOR_SCHEMA_KEY, ColorMap::new());
        ColorSchemaView {
            suggestions: suggestions(&current_schema),
            presets: self.presets(),
            current_schema,
        }
    }

    /// Replace the schema with the valid colors of `input`; invalid entries are dropped
    pub fn update(
        &mut self,
        input: &BTreeMap<String, JsonValue>,
    ) -> Result<ColorSchemaUpdated, ServiceError> {
        let valid: ColorMap = input
            .iter()
            .filter_map(|(key, value)| match value.as_str() {
                Some(color) if is_valid_color(color) => Some((key.clone(), color.to_string())),
                _ => {
                    tracing::debug!(key = key.as_str(), "dropping invalid color");
                    None
                }
            })
            .collect();

        self.registry.set(COLOR_SCHEMA_KEY, &valid)?;
        tracing::info!("color schema updated with {} colors", valid.len());

        Ok(ColorSchemaUpdated {
            success: true,
            suggestions: suggestions(&valid),
            updated_schema: valid,
        })
    }

    /// Make the stored preset `name` the current schema. A preset with no
    /// colors counts as missing.
    pub fn apply_preset(&mut self, name: Option<&str>) -> Result<PresetApplied, ServiceError> {
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ServiceError::BadRequest("preset_name is required".to_string()))?;

        let preset = self
            .presets()
            .into_iter()
            .find(|p| p.name == name && !p.colors.is_empty())
            .ok_or_else(|| ServiceError::NotFound(format!("Preset not found: {}", name)))?;

        self.registry.set(COLOR_SCHEMA_KEY, &preset.colors)?;
        tracing::info!("applied color preset {}", name);

        Ok(PresetApplied {
            success: true,
            applied_preset: name.to_string(),
            suggestions: suggestions(&preset.colors),
            schema: preset.colors,
        })
    }

    /// Store the current schema as a named preset, replacing one with the same name
    pub fn save_preset(&mut self, name: &str) -> Result<ColorPreset, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::BadRequest("preset name is required".to_string()));
        }

        let colors: ColorMap = self.registry.get_or(COLOR_SCHEMA_KEY, ColorMap::new());
        if colors.is_empty() {
            return Err(ServiceError::BadRequest(
                "current color schema is empty".to_string(),
            ));
        }

        let preset = ColorPreset {
            name: name.to_string(),
            colors,
        };
        let mut presets = self.presets();
        presets.retain(|p| p.name != preset.name);
        presets.push(preset.clone());
        self.registry.set(COLOR_PRESETS_KEY, &presets)?;

        Ok(preset)
    }

    /// Stored presets; entries may be objects or JSON-encoded strings,
    /// and entries that do not decode are skipped
    pub fn presets(&self) -> Vec<ColorPreset> {
        let Some(JsonValue::Array(entries)) = self.registry.raw(COLOR_PRESETS_KEY) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|entry| match entry {
                JsonValue::String(encoded) => serde_json::from_str(encoded).ok(),
                other => serde_json::from_value(other.clone()).ok(),
            })
            .collect()
    }
}

/// Suggestions for a schema: none for an empty schema, otherwise variants
/// of its primary color
pub fn suggestions(schema: &ColorMap) -> Vec<ColorSuggestion> {
    if schema.is_empty() {
        return Vec::new();
    }
    let primary = schema
        .get("primary_color")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PRIMARY);
    suggestions_for(primary)
}
