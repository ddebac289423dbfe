//! Linear undo checkpoints for finalized strokes.

use crate::draw::Stroke;

/// Records the stroke count before each finalized stroke.
///
/// Undo truncates the stroke list back to the most recent checkpoint, which
/// removes exactly the stroke appended after it. There is no redo: an undone
/// stroke is dropped.
#[derive(Debug, Default)]
pub struct UndoStack {
    checkpoints: Vec<usize>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a stroke is about to be appended to a list of `len` strokes.
    pub fn checkpoint(&mut self, len: usize) {
        debug_assert!(self.checkpoints.last().is_none_or(|&prev| prev < len));
        self.checkpoints.push(len);
    }

    /// Removes the last finalized stroke, if any.
    ///
    /// Returns the removed stroke so the caller can re-render; `None` leaves
    /// `strokes` untouched.
    pub fn undo(&mut self, strokes: &mut Vec<Stroke>) -> Option<Stroke> {
        let target = self
            .checkpoints
            .pop()
            .unwrap_or_else(|| strokes.len().saturating_sub(1));
        if strokes.len() <= target {
            return None;
        }
        let removed = strokes.pop();
        strokes.truncate(target);
        removed
    }

    /// Drops every checkpoint (used when the canvas is cleared).
    pub fn reset(&mut self) {
        self.checkpoints.clear();
    }

    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }
}
