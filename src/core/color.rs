//! Color value validation and palette suggestions

use serde::{Deserialize, Serialize};

/// Primary color assumed when a schema does not set one
pub const DEFAULT_PRIMARY: &str = "#0070ae";

const NAMED_COLORS: [&str; 4] = ["transparent", "inherit", "initial", "unset"];

/// Whether a color schema value is acceptable.
///
/// Accepts hex (`#rgb`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()`,
/// `hsl()`/`hsla()`, gradients and the CSS-wide keywords.
pub fn is_valid_color(color: &str) -> bool {
    let color = color.trim();
    if color.is_empty() {
        return false;
    }

    if let Some(hex) = color.strip_prefix('#') {
        return matches!(color.len(), 4 | 7 | 9) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    if ["rgb(", "rgba(", "hsl(", "hsla("]
        .iter()
        .any(|prefix| color.starts_with(prefix))
    {
        return true;
    }

    if color.contains("gradient") {
        return true;
    }

    let lower = color.to_lowercase();
    NAMED_COLORS.contains(&lower.as_str())
}

/// Stricter check used by luna theming tokens: `#rgb`, `#rrggbb` or `rgba(...)`
pub fn is_token_color(color: &str) -> bool {
    if let Some(hex) = color.strip_prefix('#') {
        return matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    color.starts_with("rgba(") && color.ends_with(')')
}

/// An RGB triple parsed from `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse a 7-character `#rrggbb` value
    pub fn parse_hex(color: &str) -> Option<Self> {
        let hex = color.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Mix with white by `factor`
    pub fn lighten(self, factor: f64) -> Self {
        let mix = |c: u8| (c as f64 + (255 - c) as f64 * factor).min(255.0) as u8;
        Self {
            r: mix(self.r),
            g: mix(self.g),
            b: mix(self.b),
        }
    }

    /// Scale toward black by `factor`
    pub fn darken(self, factor: f64) -> Self {
        let scale = |c: u8| (c as f64 * (1.0 - factor)).max(0.0) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    pub fn complement(self) -> Self {
        Self {
            r: 255 - self.r,
            g: 255 - self.g,
            b: 255 - self.b,
        }
    }
}

/// A suggested color derived from a schema's primary color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSuggestion {
    pub name: String,
    pub color: String,
    pub usage: String,
}

impl ColorSuggestion {
    fn new(name: &str, color: Rgb, usage: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_hex(),
            usage: usage.to_string(),
        }
    }
}

/// Lighter, darker and complementary variants of `primary`.
///
/// Empty unless `primary` is a `#rrggbb` color.
pub fn suggestions_for(primary: &str) -> Vec<ColorSuggestion> {
    let Some(rgb) = Rgb::parse_hex(primary) else {
        return Vec::new();
    };
    vec![
        ColorSuggestion::new(
            "Lighter Primary",
            rgb.lighten(0.2),
            "Use for backgrounds or hover states",
        ),
        ColorSuggestion::new(
            "Darker Primary",
            rgb.darken(0.2),
            "Use for emphasis or active states",
        ),
        ColorSuggestion::new(
            "Complementary",
            rgb.complement(),
            "Use for accents or call-to-action buttons",
        ),
    ]
}
