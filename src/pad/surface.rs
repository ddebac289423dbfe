//! Stroke capture and full-replay rendering.

use super::brush::BrushSettings;
use super::undo::UndoStack;
use crate::draw::{Point, RasterError, RasterTarget, Stroke};
use log::{debug, error};

/// Ordered stroke list plus the raster it is rendered into.
///
/// Every mutation of the finalized stroke list is followed by a full redraw:
/// the raster is wiped and every stroke replayed with its own brush. Undo and
/// clear therefore never need to erase pixels.
pub struct StrokeSurface<R: RasterTarget> {
    raster: R,
    strokes: Vec<Stroke>,
    in_progress: Option<Stroke>,
    undo: UndoStack,
}

impl<R: RasterTarget> StrokeSurface<R> {
    pub fn new(raster: R) -> Self {
        Self {
            raster,
            strokes: Vec::new(),
            in_progress: None,
            undo: UndoStack::new(),
        }
    }

    /// Starts a stroke with the current brush.
    ///
    /// Ignored while another stroke is in progress. Returns `true` when a
    /// stroke was started.
    pub fn begin_stroke(&mut self, point: Point, brush: &BrushSettings) -> bool {
        if self.in_progress.is_some() {
            debug!("begin_stroke ignored: a stroke is already in progress");
            return false;
        }
        self.in_progress = Some(Stroke::new(point, brush.color(), brush.radius()));
        true
    }

    /// Appends a sample to the in-progress stroke; no-op when idle.
    pub fn extend_stroke(&mut self, point: Point) -> bool {
        match self.in_progress.as_mut() {
            Some(stroke) => stroke.push(point),
            None => false,
        }
    }

    /// Finalizes the in-progress stroke, checkpoints it and redraws.
    ///
    /// Returns `true` when a stroke was committed.
    pub fn end_stroke(&mut self) -> bool {
        let Some(stroke) = self.in_progress.take() else {
            return false;
        };
        self.undo.checkpoint(self.strokes.len());
        debug!(
            "Committed stroke #{} ({} points)",
            self.strokes.len() + 1,
            stroke.points().len()
        );
        self.strokes.push(stroke);
        self.redraw();
        true
    }

    /// Drops the in-progress stroke without committing it.
    pub fn cancel_stroke(&mut self) -> bool {
        self.in_progress.take().is_some()
    }

    /// Removes the last finalized stroke and redraws. No-op when empty.
    pub fn undo(&mut self) -> bool {
        if self.undo.undo(&mut self.strokes).is_none() {
            return false;
        }
        self.redraw();
        true
    }

    /// Removes every stroke (including one in progress). Not undoable.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.in_progress = None;
        self.undo.reset();
        self.redraw();
    }

    /// Wipes the raster and replays every finalized stroke in drawing order.
    pub fn render(&mut self) -> Result<(), RasterError> {
        self.raster.clear()?;
        for stroke in &self.strokes {
            self.raster.draw_stroke(stroke)?;
        }
        Ok(())
    }

    /// Renders and encodes the finalized strokes as PNG.
    ///
    /// The in-progress stroke is never part of the image.
    pub fn rasterize(&mut self) -> Result<Vec<u8>, RasterError> {
        self.render()?;
        self.raster.encode_png()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn in_progress(&self) -> Option<&Stroke> {
        self.in_progress.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.in_progress.is_some()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.raster.dimensions()
    }

    pub fn raster(&self) -> &R {
        &self.raster
    }

    pub fn raster_mut(&mut self) -> &mut R {
        &mut self.raster
    }

    fn redraw(&mut self) {
        if let Err(e) = self.render() {
            error!("Failed to redraw stroke surface: {}", e);
        }
    }
}
