//! Configuration file support for signpad.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/signpad/config.toml`. Settings include the canvas size, brush
//! defaults, export destination, feedback timing, and keyboard shortcuts.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{BrushConfig, CanvasConfig, ExportConfig, FeedbackConfig, UiConfig};

use crate::draw::Color;
use crate::draw::color::{DARK_BLUE, TRANSPARENT, WHITE};
use crate::export::{FileSaveConfig, file::expand_tilde};
use crate::pad::{BrushSettings, RadiusRange};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CANVAS_SIZE_RANGE: std::ops::RangeInclusive<u32> = 16..=8192;
const FEEDBACK_MS_RANGE: std::ops::RangeInclusive<u64> = 100..=10_000;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 400
/// height = 400
///
/// [brush]
/// default_color = "#00008B"
/// default_radius = 1.0
///
/// [export]
/// save_directory = "~/Pictures/Signpad"
/// filename_template = "sign"
///
/// [feedback]
/// duration_ms = 2000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Initial brush and radius slider range
    #[serde(default)]
    pub brush: BrushConfig,

    /// Where and how signatures are saved
    #[serde(default)]
    pub export: ExportConfig,

    /// Confirmation timing for copy/save
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Control label preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or reset to their
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 16 - 8192
    /// - `brush.min_radius`: > 0, `brush.max_radius` >= `min_radius`
    /// - `brush.radius_step`: >= 0
    /// - `feedback.duration_ms`: 100 - 10000
    /// - `export.format`: `png`
    fn validate_and_clamp(&mut self) {
        for (name, value) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !CANVAS_SIZE_RANGE.contains(value) {
                warn!(
                    "Invalid canvas {} {}, clamping to {}-{} range",
                    name,
                    value,
                    CANVAS_SIZE_RANGE.start(),
                    CANVAS_SIZE_RANGE.end()
                );
                *value = (*value).clamp(*CANVAS_SIZE_RANGE.start(), *CANVAS_SIZE_RANGE.end());
            }
        }

        let defaults = BrushConfig::default();
        if !(self.brush.min_radius.is_finite() && self.brush.min_radius > 0.0) {
            warn!(
                "Invalid min_radius {}, falling back to {:.1}",
                self.brush.min_radius, defaults.min_radius
            );
            self.brush.min_radius = defaults.min_radius;
        }
        if !self.brush.max_radius.is_finite() || self.brush.max_radius < self.brush.min_radius {
            warn!(
                "Invalid max_radius {} (min_radius {:.1}), using {:.1}",
                self.brush.max_radius,
                self.brush.min_radius,
                defaults.max_radius.max(self.brush.min_radius)
            );
            self.brush.max_radius = defaults.max_radius.max(self.brush.min_radius);
        }
        if !(self.brush.radius_step.is_finite() && self.brush.radius_step >= 0.0) {
            warn!(
                "Invalid radius_step {}, falling back to {:.1}",
                self.brush.radius_step, defaults.radius_step
            );
            self.brush.radius_step = defaults.radius_step;
        }
        if !(self.brush.min_radius..=self.brush.max_radius).contains(&self.brush.default_radius) {
            warn!(
                "Invalid default_radius {}, clamping to {:.1}-{:.1} range",
                self.brush.default_radius, self.brush.min_radius, self.brush.max_radius
            );
            self.brush.default_radius = if self.brush.default_radius.is_finite() {
                self.brush
                    .default_radius
                    .clamp(self.brush.min_radius, self.brush.max_radius)
            } else {
                self.brush.min_radius
            };
        }

        if !FEEDBACK_MS_RANGE.contains(&self.feedback.duration_ms) {
            warn!(
                "Invalid feedback duration_ms {}, clamping to {}-{} range",
                self.feedback.duration_ms,
                FEEDBACK_MS_RANGE.start(),
                FEEDBACK_MS_RANGE.end()
            );
            self.feedback.duration_ms = self
                .feedback
                .duration_ms
                .clamp(*FEEDBACK_MS_RANGE.start(), *FEEDBACK_MS_RANGE.end());
        }

        if !self.export.format.eq_ignore_ascii_case("png") {
            warn!(
                "Unsupported export format '{}', falling back to 'png'",
                self.export.format
            );
            self.export.format = "png".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty filename_template, falling back to 'sign'");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/signpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("signpad");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to `~/.config/signpad/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot be
    /// serialized, or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the config to TOML at `config_path`, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Writes the documented example config to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path, or if the
    /// directory or file cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Initial brush built from `[brush]`.
    pub fn brush_settings(&self) -> BrushSettings {
        let range = RadiusRange {
            min: self.brush.min_radius,
            max: self.brush.max_radius,
            step: self.brush.radius_step,
        };
        BrushSettings::new(
            self.brush.default_color.to_color_or(DARK_BLUE),
            self.brush.default_radius,
            range,
        )
    }

    /// Background painted under strokes and into exports.
    pub fn background_color(&self) -> Color {
        if self.canvas.transparent_background {
            TRANSPARENT
        } else {
            self.canvas.background.to_color_or(WHITE)
        }
    }

    /// Save destination built from `[export]`.
    pub fn file_save_config(&self) -> FileSaveConfig {
        let mut save_config = FileSaveConfig {
            filename_template: self.export.filename_template.clone(),
            format: self.export.format.to_lowercase(),
            ..FileSaveConfig::default()
        };
        if let Some(dir) = &self.export.save_directory {
            save_config.save_directory = expand_tilde(dir);
        }
        save_config
    }

    /// Replaces the canvas size (e.g. from the command line), clamped like file values.
    pub fn override_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas.width = width;
        self.canvas.height = height;
        self.validate_and_clamp();
    }

    /// Sends saved images to `directory` instead of the configured one.
    pub fn override_save_directory(&mut self, directory: &Path) {
        self.export.save_directory = Some(directory.to_string_lossy().into_owned());
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback.duration_ms)
    }
}
