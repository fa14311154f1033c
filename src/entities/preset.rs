//! Color presets - built-in design presets and site-stored color presets

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::fields::COLOR_KEYS;

/// A built-in design preset offered to the color schema widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignPreset {
    pub id: String,
    pub name: String,
    pub colors: BTreeMap<String, String>,
}

impl DesignPreset {
    fn new(id: &str, name: &str, colors: [(&str, &str); 5]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            colors: colors
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Presets plus the color keys a schema may set
#[derive(Debug, Clone, Serialize)]
pub struct DesignPresets {
    pub presets: Vec<DesignPreset>,
    pub available_fields: Vec<&'static str>,
}

/// The built-in design presets
pub fn design_presets() -> DesignPresets {
    let presets = vec![
        DesignPreset::new(
            "default",
            "Default",
            [
                ("background_color", "#ffffff"),
                ("primary_color", "#0070ae"),
                ("secondary_color", "#e73d5c"),
                ("text_color", "#333333"),
                ("accent_color", "#6bb535"),
            ],
        ),
        DesignPreset::new(
            "dark",
            "Dark Mode",
            [
                ("background_color", "#1a1a1a"),
                ("primary_color", "#4a9eff"),
                ("secondary_color", "#ff6b9d"),
                ("text_color", "#ffffff"),
                ("accent_color", "#84d65a"),
            ],
        ),
        DesignPreset::new(
            "corporate",
            "Corporate Blue",
            [
                ("background_color", "#f8f9fa"),
                ("primary_color", "#003d7a"),
                ("secondary_color", "#dc3545"),
                ("text_color", "#212529"),
                ("accent_color", "#28a745"),
            ],
        ),
        DesignPreset::new(
            "nature",
            "Nature Green",
            [
                ("background_color", "#f1f8e9"),
                ("primary_color", "#2e7d32"),
                ("secondary_color", "#ff8f00"),
                ("text_color", "#1b5e20"),
                ("accent_color", "#4caf50"),
            ],
        ),
    ];

    DesignPresets {
        presets,
        available_fields: COLOR_KEYS.to_vec(),
    }
}

/// A named color schema stored in the site registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPreset {
    pub name: String,

    #[serde(flatten)]
    pub colors: BTreeMap<String, String>,
}
