//! Current brush color and radius.

use crate::draw::Color;
use log::{debug, warn};

/// Allowed brush radii, mirroring the range slider: `min..=max` in `step`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for RadiusRange {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 3.0,
            step: 0.5,
        }
    }
}

impl RadiusRange {
    /// Clamps `value` into range and snaps it to the nearest step above `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let steps = ((clamped - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

/// Brush state read whenever a stroke begins.
///
/// Setters validate their input; invalid values are rejected or clamped here
/// and never reach the stroke model. Changes only affect strokes started
/// afterwards.
#[derive(Debug, Clone)]
pub struct BrushSettings {
    color: Color,
    radius: f64,
    range: RadiusRange,
}

impl BrushSettings {
    pub fn new(color: Color, radius: f64, range: RadiusRange) -> Self {
        Self {
            color,
            radius: range.clamp(radius),
            range,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn range(&self) -> RadiusRange {
        self.range
    }

    /// Sets the ink color from a hex value (`#RRGGBB`, `#RGB`) or color name.
    ///
    /// Returns `false` and keeps the current color when `value` is malformed.
    pub fn set_color(&mut self, value: &str) -> bool {
        match Color::parse(value) {
            Some(color) => {
                self.color = color;
                debug!("Brush color set to {}", color.to_hex());
                true
            }
            None => {
                warn!("Ignoring malformed brush color '{}'", value);
                false
            }
        }
    }

    /// Sets the brush radius, clamped and snapped to the configured range.
    ///
    /// Returns the radius actually applied. Non-finite input is ignored.
    pub fn set_radius(&mut self, value: f64) -> f64 {
        if !value.is_finite() {
            warn!("Ignoring non-finite brush radius {}", value);
            return self.radius;
        }

        let radius = self.range.clamp(value);
        if radius != value {
            warn!(
                "Brush radius {:.2} outside {:.1}-{:.1} (step {:.1}), using {:.2}",
                value, self.range.min, self.range.max, self.range.step, radius
            );
        }
        self.radius = radius;
        debug!("Brush radius set to {:.2}", radius);
        radius
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::new(crate::draw::color::DARK_BLUE, 1.0, RadiusRange::default())
    }
}
