//! Luna theming service - read and validate site-wide design tokens

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::core::color::is_token_color;
use crate::core::registry::Registry;
use crate::core::service::ServiceError;
use crate::entities::theming::{Fonts, LunaTheming, BUTTON_PROPERTIES, THEMING_COLOR_KEYS};

pub const THEMING_KEY: &str = "lunasites.luna_theming.luna_theming_config";

#[derive(Debug, Serialize)]
pub struct ThemingView {
    pub luna_theming: LunaTheming,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub source: &'static str,
}

/// Stored tokens, or the built-in set when nothing usable is stored
pub fn get(registry: &Registry) -> ThemingView {
    let stored: Option<LunaTheming> = registry.get(THEMING_KEY);
    ThemingView {
        luna_theming: stored
            .filter(|t| !t.is_empty())
            .unwrap_or_else(LunaTheming::builtin),
        status: None,
        source: "registry",
    }
}

/// Validate `input` and store what survives
pub fn update(registry: &mut Registry, input: &JsonValue) -> Result<ThemingView, ServiceError> {
    let theming = validate(input);
    registry.set(THEMING_KEY, &theming)?;
    tracing::info!("luna theming updated");

    Ok(ThemingView {
        luna_theming: theming,
        status: Some("updated"),
        source: "registry",
    })
}

/// Drop the stored tokens so the built-in set applies again
pub fn reset(registry: &mut Registry) -> Result<ThemingView, ServiceError> {
    let removed = registry.remove(THEMING_KEY)?;
    if removed.is_some() {
        tracing::info!("luna theming reset to built-in tokens");
    }

    Ok(ThemingView {
        luna_theming: LunaTheming::builtin(),
        status: Some("reset"),
        source: "registry",
    })
}

/// Keep only known tokens with acceptable values. A section present in the
/// input is kept (possibly empty) even when none of its entries survive.
pub fn validate(input: &JsonValue) -> LunaTheming {
    let mut theming = LunaTheming::default();

    if let Some(colors) = input.get("colors") {
        let mut valid = BTreeMap::new();
        for key in THEMING_COLOR_KEYS {
            if let Some(color) = colors.get(key).and_then(JsonValue::as_str) {
                if is_token_color(color) {
                    valid.insert(key.to_string(), color.to_string());
                }
            }
        }
        theming.colors = Some(valid);
    }

    if let Some(fonts) = input.get("fonts") {
        // Font names must be text; other values are dropped
        let text = |key: &str| fonts.get(key).and_then(JsonValue::as_str).map(str::to_string);
        theming.fonts = Some(Fonts {
            primary_font: text("primary_font"),
            secondary_font: text("secondary_font"),
            font_sizes: fonts.get("font_sizes").and_then(JsonValue::as_object).map(|sizes| {
                sizes
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect()
            }),
        });
    }

    if let Some(buttons) = input.get("buttons") {
        let mut valid = BTreeMap::new();
        for prop in BUTTON_PROPERTIES {
            if let Some(value) = buttons.get(prop) {
                valid.insert(prop.to_string(), value.clone());
            }
        }
        theming.buttons = Some(valid);
    }

    theming
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_get_falls_back_to_builtin() {
        let tmp = tempdir().unwrap();
        let registry = Registry::open(&tmp.path().join("registry.yaml")).unwrap();
        let view = get(&registry);
        assert_eq!(view.luna_theming, LunaTheming::builtin());
        assert_eq!(view.source, "registry");
    }

    #[test]
    fn test_validate_filters_tokens() {
        let theming = validate(&json!({
            "colors": {
                "primary_color": "#094ce1",
                "secondary_color": "red",
                "made_up_color": "#ffffff"
            },
            "fonts": {"primary_font": "Inter", "font_sizes": "big"},
            "buttons": {"padding": "4px", "shadow": "none"},
            "unknown": {}
        }));

        let colors = theming.colors.unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors["primary_color"], "#094ce1");

        let fonts = theming.fonts.unwrap();
        assert_eq!(fonts.primary_font.as_deref(), Some("Inter"));
        assert!(fonts.font_sizes.is_none());

        let buttons = theming.buttons.unwrap();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons["padding"], json!("4px"));
    }

    #[test]
    fn test_absent_sections_stay_absent() {
        let theming = validate(&json!({"buttons": {"padding": "2px"}}));
        assert!(theming.colors.is_none());
        assert!(theming.fonts.is_none());
    }

    #[test]
    fn test_reset_restores_builtin() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("registry.yaml");
        let mut registry = Registry::open(&path).unwrap();
        update(&mut registry, &json!({"colors": {"neutral_color": "#222"}})).unwrap();

        let view = reset(&mut registry).unwrap();
        assert_eq!(view.status, Some("reset"));
        assert!(registry.raw(THEMING_KEY).is_none());

        let reopened = Registry::open(&path).unwrap();
        assert_eq!(get(&reopened).luna_theming, LunaTheming::builtin());
    }

    #[test]
    fn test_fonts_keep_only_text_names() {
        let theming = validate(&json!({"fonts": {"primary_font": 12, "secondary_font": "Lora"}}));
        let fonts = theming.fonts.unwrap();
        assert_eq!(fonts.primary_font, None);
        assert_eq!(fonts.secondary_font.as_deref(), Some("Lora"));
    }

    #[test]
    fn test_update_persists() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("registry.yaml");
        let mut registry = Registry::open(&path).unwrap();

        let view = update(&mut registry, &json!({"colors": {"neutral_color": "#222"}})).unwrap();
        assert_eq!(view.status, Some("updated"));

        let reopened = Registry::open(&path).unwrap();
        let stored = get(&reopened).luna_theming;
        assert_eq!(stored.colors.unwrap()["neutral_color"], "#222");
        assert!(stored.fonts.is_none());
    }
}
