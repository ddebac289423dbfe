//! Configuration enum types.

use crate::draw::Color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a hex value, a color name or RGB values.
///
/// # Examples
/// ```toml
/// # Hex value, as produced by a color picker
/// default_color = "#00008B"
///
/// # Named color
/// default_color = "black"
///
/// # RGB color (0-255 per component)
/// default_color = [0, 0, 139]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Hex (`#RRGGBB`, `#RGB`) or named color
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Parses the specification, returning `None` for unknown names or malformed hex.
    pub fn parse(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) => Color::parse(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::from_rgb8(*r, *g, *b)),
        }
    }

    /// Converts the specification to a [`Color`], falling back to `fallback`
    /// with a warning when it cannot be parsed.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        self.parse().unwrap_or_else(|| {
            warn!("Unknown color {:?}, using {}", self, fallback.to_hex());
            fallback
        })
    }
}
