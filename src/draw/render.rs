//! Cairo-based rendering functions for strokes.

use super::color::Color;
use super::stroke::{Point, Stroke};

/// Fraction of the full width used for a zero-pressure sample.
const MIN_PRESSURE_SCALE: f64 = 0.1;

/// Paints the whole target with `background`, replacing existing pixels.
///
/// A fully transparent background clears the surface instead.
pub fn fill_background(ctx: &cairo::Context, background: Color) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    let painted = ctx.paint();
    ctx.restore()?;
    painted
}

/// Renders a single stroke with its recorded color and radius.
///
/// Paths are smoothed with quadratic curves through the midpoints between
/// samples. A stroke with one sample renders as a dot, and strokes with
/// pressure data render segment by segment so the width can vary.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) -> Result<(), cairo::Error> {
    let points = stroke.points();
    let Some(&first) = points.first() else {
        return Ok(());
    };

    ctx.save()?;
    ctx.set_operator(cairo::Operator::Over);
    ctx.set_source_rgba(stroke.color.r, stroke.color.g, stroke.color.b, stroke.color.a);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let result = if points.len() == 1 {
        render_dot(ctx, first, stroke.radius)
    } else if stroke.has_pressure() {
        render_pressure_segments(ctx, points, stroke.line_width())
    } else {
        ctx.set_line_width(stroke.line_width());
        trace_smoothed_path(ctx, points);
        ctx.stroke()
    };

    ctx.restore()?;
    result
}

fn render_dot(ctx: &cairo::Context, point: Point, radius: f64) -> Result<(), cairo::Error> {
    let radius = radius * pressure_scale(point.pressure);
    ctx.new_path();
    ctx.arc(point.x, point.y, radius, 0.0, std::f64::consts::TAU);
    ctx.fill()
}

fn render_pressure_segments(
    ctx: &cairo::Context,
    points: &[Point],
    width: f64,
) -> Result<(), cairo::Error> {
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let scale = (pressure_scale(a.pressure) + pressure_scale(b.pressure)) / 2.0;
        ctx.set_line_width(width * scale);
        ctx.move_to(a.x, a.y);
        ctx.line_to(b.x, b.y);
        ctx.stroke()?;
    }
    Ok(())
}

fn pressure_scale(pressure: Option<f64>) -> f64 {
    pressure.map_or(1.0, |p| p.max(MIN_PRESSURE_SCALE))
}

/// Builds the smoothed path: each interior sample is the control point of a
/// quadratic curve ending halfway to the next sample.
fn trace_smoothed_path(ctx: &cairo::Context, points: &[Point]) {
    let mut current = (points[0].x, points[0].y);
    ctx.move_to(current.0, current.1);

    for pair in points[1..].windows(2) {
        let control = (pair[0].x, pair[0].y);
        let end = ((pair[0].x + pair[1].x) / 2.0, (pair[0].y + pair[1].y) / 2.0);
        quadratic_to(ctx, current, control, end);
        current = end;
    }

    if let Some(last) = points.last() {
        ctx.line_to(last.x, last.y);
    }
}

/// Cairo only has cubic curves; elevate the quadratic segment.
fn quadratic_to(ctx: &cairo::Context, from: (f64, f64), control: (f64, f64), to: (f64, f64)) {
    let c1 = (
        from.0 + 2.0 / 3.0 * (control.0 - from.0),
        from.1 + 2.0 / 3.0 * (control.1 - from.1),
    );
    let c2 = (
        to.0 + 2.0 / 3.0 * (control.0 - to.0),
        to.1 + 2.0 / 3.0 * (control.1 - to.1),
    );
    ctx.curve_to(c1.0, c1.1, c2.0, c2.1, to.0, to.1);
}
