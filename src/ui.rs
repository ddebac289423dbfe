//! Control labels and status text derived from pad state.

use crate::config::{Action, UiConfig};
use crate::draw::RasterTarget;
use crate::feedback::{Control, ControlStatus};
use crate::pad::SignPad;

/// Buttons shown next to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Undo,
    Clear,
    Copy,
    Save,
}

impl ControlKind {
    pub const ALL: [ControlKind; 4] = [
        ControlKind::Undo,
        ControlKind::Clear,
        ControlKind::Copy,
        ControlKind::Save,
    ];

    pub fn action(self) -> Action {
        match self {
            ControlKind::Undo => Action::Undo,
            ControlKind::Clear => Action::ClearCanvas,
            ControlKind::Copy => Action::CopyToClipboard,
            ControlKind::Save => Action::SaveToFile,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ControlKind::Undo => "Undo",
            ControlKind::Clear => "Clear",
            ControlKind::Copy => "Copy",
            ControlKind::Save => "Save",
        }
    }

    /// Feedback slot backing this control; only export controls have one.
    pub fn feedback_control(self) -> Option<Control> {
        match self {
            ControlKind::Copy => Some(Control::Copy),
            ControlKind::Save => Some(Control::Save),
            ControlKind::Undo | ControlKind::Clear => None,
        }
    }

    fn confirmation(self) -> &'static str {
        match self {
            ControlKind::Copy => "Copied 👌",
            ControlKind::Save => "Saved 👌",
            ControlKind::Undo | ControlKind::Clear => self.title(),
        }
    }
}

/// Narrow viewports (phones) hide shortcut hints.
pub fn is_compact(viewport_width: u32, ui: &UiConfig) -> bool {
    viewport_width < ui.compact_width
}

/// Text of one control.
///
/// Acknowledged controls show their confirmation, failed ones a failure
/// notice, and idle ones `[hint] Title` (just the title when `compact` or
/// when no chord is bound).
pub fn control_label(
    kind: ControlKind,
    status: ControlStatus,
    hint: Option<&str>,
    compact: bool,
) -> String {
    match status {
        ControlStatus::Acknowledged => kind.confirmation().to_string(),
        ControlStatus::Failed => format!("{} failed", kind.title()),
        ControlStatus::Idle => match hint {
            Some(hint) if !compact => format!("[{}] {}", hint, kind.title()),
            _ => kind.title().to_string(),
        },
    }
}

/// Current label of every control, in [`ControlKind::ALL`] order.
pub fn control_labels<R: RasterTarget>(
    pad: &SignPad<R>,
    viewport_width: u32,
    ui: &UiConfig,
) -> Vec<(ControlKind, String)> {
    let compact = is_compact(viewport_width, ui);
    ControlKind::ALL
        .iter()
        .map(|&kind| {
            let status = kind
                .feedback_control()
                .map_or(ControlStatus::Idle, |control| pad.control_status(control));
            let hint = pad.shortcuts().hint(kind.action());
            (kind, control_label(kind, status, hint, compact))
        })
        .collect()
}

/// One-line summary of the brush and canvas, shown under the controls.
pub fn status_line<R: RasterTarget>(pad: &SignPad<R>) -> String {
    let brush = pad.brush();
    let strokes = pad.strokes().len();
    let mut line = format!(
        "Ink {} | Brush size {:.1} | {} stroke{}",
        brush.color().to_hex(),
        brush.radius(),
        strokes,
        if strokes == 1 { "" } else { "s" }
    );
    if let Some(err) = pad.last_error() {
        line.push_str(" | ");
        line.push_str(err);
    }
    line
}
