//! Stroke data captured from pointer input.

use super::color::Color;

/// A sampled pointer position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Stylus pressure in `0.0..=1.0`, when the device reports one
    pub pressure: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: None,
        }
    }

    /// Creates a point with pressure, clamped to `0.0..=1.0`.
    pub fn with_pressure(x: f64, y: f64, pressure: f64) -> Self {
        let pressure = if pressure.is_finite() {
            Some(pressure.clamp(0.0, 1.0))
        } else {
            None
        };
        Self { x, y, pressure }
    }

    fn same_position(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// One press→release gesture together with the brush it was drawn with.
///
/// Strokes keep their own color and radius so a full re-render always
/// reproduces them the way they were drawn, whatever the current brush is.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    /// Ink color recorded at stroke start
    pub color: Color,
    /// Brush radius in pixels recorded at stroke start
    pub radius: f64,
}

impl Stroke {
    /// Starts a stroke at `origin`.
    pub fn new(origin: Point, color: Color, radius: f64) -> Self {
        Self {
            points: vec![origin],
            color,
            radius,
        }
    }

    /// Appends a point, skipping exact repeats of the previous sample.
    ///
    /// Returns `true` when the point was recorded.
    pub fn push(&mut self, point: Point) -> bool {
        if self
            .points
            .last()
            .is_some_and(|last| last.same_position(&point) && last.pressure == point.pressure)
        {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether any sample carries pressure information.
    pub fn has_pressure(&self) -> bool {
        self.points.iter().any(|p| p.pressure.is_some())
    }

    /// Line width used when stroking this path.
    pub fn line_width(&self) -> f64 {
        self.radius * 2.0
    }
}
