//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas geometry and background.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 16 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 16 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Background painted under the strokes and included in exports
    #[serde(default = "default_background")]
    pub background: ColorSpec,

    /// Export with a transparent background instead of `background`
    #[serde(default)]
    pub transparent_background: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
            transparent_background: false,
        }
    }
}

/// Brush defaults and the radius slider range.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Initial ink color - hex (`"#00008B"`), a name, or `[r, g, b]`
    #[serde(default = "default_brush_color")]
    pub default_color: ColorSpec,

    /// Initial brush radius in pixels
    #[serde(default = "default_brush_radius")]
    pub default_radius: f64,

    /// Smallest selectable radius (must be > 0)
    #[serde(default = "default_min_radius")]
    pub min_radius: f64,

    /// Largest selectable radius
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,

    /// Slider step; 0 allows any value in range
    #[serde(default = "default_radius_step")]
    pub radius_step: f64,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            default_color: default_brush_color(),
            default_radius: default_brush_radius(),
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
            radius_step: default_radius_step(),
        }
    }
}

/// Export destination settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory saved images go to (`~` is expanded); defaults to `~/Pictures/Signpad`
    #[serde(default)]
    pub save_directory: Option<String>,

    /// File name without extension; chrono format specifiers are expanded
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// File extension of saved images (only `png` is produced)
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            save_directory: None,
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

/// Timing of the "Copied"/"Saved" confirmation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackConfig {
    /// How long a control shows its confirmation, in milliseconds (valid range: 100 - 10000)
    #[serde(default = "default_feedback_duration")]
    pub duration_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_feedback_duration(),
        }
    }
}

/// Control label preferences.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Viewports narrower than this (in pixels) hide shortcut hints
    #[serde(default = "default_compact_width")]
    pub compact_width: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            compact_width: default_compact_width(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> u32 {
    400
}

fn default_canvas_height() -> u32 {
    400
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("#ffffff".to_string())
}

fn default_brush_color() -> ColorSpec {
    ColorSpec::Name("#00008B".to_string())
}

fn default_brush_radius() -> f64 {
    1.0
}

fn default_min_radius() -> f64 {
    0.5
}

fn default_max_radius() -> f64 {
    3.0
}

fn default_radius_step() -> f64 {
    0.5
}

fn default_filename_template() -> String {
    "sign".to_string()
}

fn default_format() -> String {
    "png".to_string()
}

fn default_feedback_duration() -> u64 {
    2000
}

fn default_compact_width() -> u32 {
    600
}
