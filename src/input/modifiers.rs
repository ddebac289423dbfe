//! Keyboard modifier state.

/// Keyboard modifier state attached to a key chord.
///
/// `meta` is the Command key on macOS keyboards and Super elsewhere; both
/// act as the primary shortcut modifier alongside Ctrl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
    /// Cmd/Meta/Super key pressed
    pub meta: bool,
}

impl Modifiers {
    /// Returns `true` when no modifier is held.
    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }
}
