//! Luna theming entity - site-wide design tokens

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Color tokens a theming config may set
pub const THEMING_COLOR_KEYS: [&str; 5] = [
    "background_color",
    "neutral_color",
    "primary_color",
    "secondary_color",
    "tertiary_color",
];

/// Button properties a theming config may set
pub const BUTTON_PROPERTIES: [&str; 4] = ["border_radius", "padding", "font_weight", "transition"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fonts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_font: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_font: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_sizes: Option<BTreeMap<String, JsonValue>>,
}

/// Site-wide theming tokens; absent sections are left to the frontend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LunaTheming {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fonts: Option<Fonts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<BTreeMap<String, JsonValue>>,
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn json_map(pairs: &[(&str, &str)]) -> BTreeMap<String, JsonValue> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), JsonValue::String(v.to_string())))
        .collect()
}

impl LunaTheming {
    pub fn is_empty(&self) -> bool {
        self.colors.is_none() && self.fonts.is_none() && self.buttons.is_none()
    }

    /// Tokens used when the site has not stored any
    pub fn builtin() -> Self {
        Self {
            colors: Some(string_map(&[
                ("background_color", "#ffffff"),
                ("neutral_color", "#222222"),
                ("primary_color", "#094ce1"),
                ("secondary_color", "#e73d5c"),
                ("tertiary_color", "#6bb535"),
            ])),
            fonts: Some(Fonts {
                primary_font: Some("Inter".to_string()),
                secondary_font: Some("Helvetica".to_string()),
                font_sizes: Some(json_map(&[
                    ("small", "14px"),
                    ("medium", "16px"),
                    ("large", "18px"),
                    ("xl", "24px"),
                    ("xxl", "32px"),
                ])),
            }),
            buttons: Some(json_map(&[
                ("border_radius", "6px"),
                ("padding", "8px 16px"),
                ("font_weight", "500"),
                ("transition", "all 0.15s ease"),
            ])),
        }
    }
}
