//! The signature pad component.
//!
//! [`SignPad`] owns the stroke surface, the brush, the export service, the
//! transient feedback and the keyboard registration, and exposes the
//! capability set hosts drive: pointer strokes, clear, undo, brush setters,
//! image export and key chords.

pub mod brush;
pub mod surface;
pub mod undo;

#[cfg(test)]
mod tests;

pub use brush::{BrushSettings, RadiusRange};
pub use surface::StrokeSurface;
pub use undo::UndoStack;

use crate::config::{Action, Config};
use crate::draw::{CairoRaster, Point, RasterTarget, Stroke};
use crate::export::{ExportArtifact, ExportDestination, ExportError, ExportReceipt, ExportService};
use crate::feedback::{Control, ControlStatus, TransientFeedback};
use crate::input::{
    KeyChord, KeyDisposition, KeyboardHub, ListenerGuard, MouseButton, PointerEvent,
    ShortcutDispatcher,
};
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::path::PathBuf;
use std::time::Instant;

/// Feedback control driven by an export destination.
pub fn control_for(destination: ExportDestination) -> Control {
    match destination {
        ExportDestination::Clipboard => Control::Copy,
        ExportDestination::File => Control::Save,
    }
}

/// A freehand signature pad rendered into `R`.
pub struct SignPad<R: RasterTarget = CairoRaster> {
    surface: StrokeSurface<R>,
    brush: BrushSettings,
    exporter: ExportService,
    feedback: TransientFeedback,
    shortcuts: ShortcutDispatcher,
    listener: Option<ListenerGuard>,
    last_error: Option<String>,
}

impl SignPad<CairoRaster> {
    /// Builds a pad with a Cairo canvas sized and styled from `config`.
    ///
    /// # Errors
    /// Returns an error if the canvas cannot be allocated or the
    /// keybindings are invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let raster = CairoRaster::new(
            config.canvas.width,
            config.canvas.height,
            config.background_color(),
        )
        .context("Failed to create signature canvas")?;

        let shortcuts = ShortcutDispatcher::from_config(&config.keybindings)
            .map_err(|e| anyhow::anyhow!("Invalid keybindings: {}", e))?;

        Ok(Self::new(
            raster,
            config.brush_settings(),
            ExportService::new(config.file_save_config()),
            TransientFeedback::new(config.feedback_duration()),
            shortcuts,
        ))
    }
}

impl<R: RasterTarget> SignPad<R> {
    pub fn new(
        raster: R,
        brush: BrushSettings,
        exporter: ExportService,
        feedback: TransientFeedback,
        shortcuts: ShortcutDispatcher,
    ) -> Self {
        let mut surface = StrokeSurface::new(raster);
        if let Err(e) = surface.render() {
            error!("Failed to paint empty canvas: {}", e);
        }
        Self {
            surface,
            brush,
            exporter,
            feedback,
            shortcuts,
            listener: None,
            last_error: None,
        }
    }

    /// Replaces the export service (used to inject mock backends).
    pub fn with_export_service(mut self, exporter: ExportService) -> Self {
        self.exporter = exporter;
        self
    }

    // ------------------------------------------------------------------
    // Strokes
    // ------------------------------------------------------------------

    pub fn begin_stroke(&mut self, point: Point) -> bool {
        self.surface.begin_stroke(point, &self.brush)
    }

    pub fn extend_stroke(&mut self, point: Point) -> bool {
        self.surface.extend_stroke(point)
    }

    pub fn end_stroke(&mut self) -> bool {
        self.surface.end_stroke()
    }

    pub fn cancel_stroke(&mut self) -> bool {
        let cancelled = self.surface.cancel_stroke();
        if cancelled {
            debug!("Cancelled in-progress stroke");
        }
        cancelled
    }

    /// Routes a pointer event to the stroke lifecycle.
    ///
    /// Only the primary button draws. Returns `true` if the stroke model changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Press {
                point,
                button: MouseButton::Left,
            } => self.begin_stroke(point),
            PointerEvent::Press { button, .. } => {
                debug!("Ignoring press with {:?} button", button);
                false
            }
            PointerEvent::Move { point } => self.extend_stroke(point),
            PointerEvent::Release => self.end_stroke(),
            PointerEvent::Cancel => self.cancel_stroke(),
        }
    }

    /// Removes every stroke. Not undoable.
    pub fn clear(&mut self) {
        debug!("Clearing {} strokes", self.surface.strokes().len());
        self.surface.clear();
    }

    /// Removes the most recent finalized stroke; no-op when there is none.
    pub fn undo(&mut self) -> bool {
        let undone = self.surface.undo();
        if undone {
            debug!("Undo: {} strokes remain", self.surface.strokes().len());
        }
        undone
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.surface.strokes()
    }

    pub fn is_drawing(&self) -> bool {
        self.surface.is_drawing()
    }

    pub fn surface(&self) -> &StrokeSurface<R> {
        &self.surface
    }

    // ------------------------------------------------------------------
    // Brush
    // ------------------------------------------------------------------

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    /// Sets the ink color for strokes started afterwards.
    pub fn set_color(&mut self, value: &str) -> bool {
        self.brush.set_color(value)
    }

    /// Sets the brush radius for strokes started afterwards.
    pub fn set_radius(&mut self, value: f64) -> f64 {
        self.brush.set_radius(value)
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    pub fn export_service(&self) -> &ExportService {
        &self.exporter
    }

    /// Renders the finalized strokes and encodes them as PNG.
    ///
    /// A stroke still in progress is not part of the image.
    pub fn to_image(&mut self) -> Result<ExportArtifact, ExportError> {
        let png = self.surface.rasterize()?;
        let (width, height) = self.surface.dimensions();
        Ok(ExportArtifact { png, width, height })
    }

    /// Copies the current image to the clipboard and updates the Copy control.
    pub async fn copy_to_clipboard(&mut self) -> Result<(), ExportError> {
        self.export(ExportDestination::Clipboard).await.map(|_| ())
    }

    /// Saves the current image under the default file name and updates the Save control.
    pub async fn save_to_file(&mut self) -> Result<PathBuf, ExportError> {
        match self.export(ExportDestination::File).await? {
            ExportReceipt::Saved(path) => Ok(path),
            ExportReceipt::Copied => Err(ExportError::Task(
                "Clipboard receipt returned for a file export".to_string(),
            )),
        }
    }

    /// Snapshots the image and delivers it to `destination`.
    pub async fn export(
        &mut self,
        destination: ExportDestination,
    ) -> Result<ExportReceipt, ExportError> {
        let control = control_for(destination);
        let result = match self.to_image() {
            Ok(artifact) => self.exporter.deliver(artifact, destination).await,
            Err(e) => Err(e),
        };
        self.finish_export(control, &result, Instant::now());
        result
    }

    /// Applies the outcome of an export to the control's feedback.
    ///
    /// Success acknowledges the control; failure raises its failure
    /// indicator and records the message in [`last_error`](Self::last_error).
    pub fn finish_export<T>(
        &mut self,
        control: Control,
        result: &Result<T, ExportError>,
        now: Instant,
    ) {
        match result {
            Ok(_) => {
                info!("{:?} export succeeded", control);
                self.last_error = None;
                self.feedback.trigger(control, now);
            }
            Err(e) => {
                error!("{:?} export failed: {}", control, e);
                self.last_error = Some(e.to_string());
                self.feedback.fail(control, now);
            }
        }
    }

    /// Message of the most recent failed export, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ------------------------------------------------------------------
    // Feedback
    // ------------------------------------------------------------------

    pub fn feedback(&self) -> &TransientFeedback {
        &self.feedback
    }

    pub fn control_status(&self, control: Control) -> ControlStatus {
        self.feedback.status(control)
    }

    /// Expires feedback windows that ended by `now`.
    pub fn advance_feedback(&mut self, now: Instant) -> bool {
        self.feedback.advance(now)
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    pub fn shortcuts(&self) -> &ShortcutDispatcher {
        &self.shortcuts
    }

    /// Starts listening for chords on `hub`.
    ///
    /// Mounting again on the same hub keeps the existing registration;
    /// mounting on another hub moves it.
    pub fn mount(&mut self, hub: &KeyboardHub) {
        if self
            .listener
            .as_ref()
            .is_some_and(|guard| guard.belongs_to(hub) && guard.is_registered())
        {
            debug!("Pad already mounted");
            return;
        }
        self.listener = Some(hub.register());
    }

    /// Stops listening for chords; keys pass through afterwards.
    pub fn unmount(&mut self) {
        if self.listener.take().is_some() {
            debug!("Pad unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// Resolves `chord` and performs its synchronous action.
    ///
    /// Clear, undo and cancel run immediately. Export actions are reported
    /// as handled without running; the caller performs them with
    /// [`export`](Self::export) or by delivering a [`to_image`](Self::to_image)
    /// snapshot itself. Unbound chords, and every chord while unmounted,
    /// pass through.
    pub fn on_key(&mut self, chord: &KeyChord) -> KeyDisposition {
        if !self.is_mounted() {
            return KeyDisposition::PassThrough;
        }
        let Some(action) = self.shortcuts.resolve(chord) else {
            debug!("Key {} not bound, passing through", chord);
            return KeyDisposition::PassThrough;
        };

        debug!("Key {} -> {:?}", chord, action);
        match action {
            Action::ClearCanvas => self.clear(),
            Action::Undo => {
                self.undo();
            }
            Action::CancelStroke => {
                self.cancel_stroke();
            }
            Action::CopyToClipboard | Action::SaveToFile => {}
        }
        KeyDisposition::Handled(action)
    }

    /// Applies every chord the hub has queued for this pad, oldest first.
    ///
    /// Returns one disposition per chord. Nothing is queued while unmounted.
    pub fn process_keys(&mut self) -> Vec<KeyDisposition> {
        let mut dispositions = Vec::new();
        while let Some(chord) = self.listener.as_ref().and_then(ListenerGuard::next_chord) {
            dispositions.push(self.on_key(&chord));
        }
        dispositions
    }

    /// Like [`on_key`](Self::on_key), but also awaits export actions.
    ///
    /// # Errors
    /// Returns the export failure; feedback and
    /// [`last_error`](Self::last_error) are updated as well.
    pub async fn handle_key(&mut self, chord: &KeyChord) -> Result<KeyDisposition, ExportError> {
        let disposition = self.on_key(chord);
        if let KeyDisposition::Handled(action) = disposition
            && let Some(destination) = export_destination(action)
        {
            self.export(destination).await?;
        }
        Ok(disposition)
    }
}

/// Export destination an action delivers to, if it is an export action.
pub fn export_destination(action: Action) -> Option<ExportDestination> {
    match action {
        Action::CopyToClipboard => Some(ExportDestination::Clipboard),
        Action::SaveToFile => Some(ExportDestination::File),
        Action::ClearCanvas | Action::Undo | Action::CancelStroke => None,
    }
}
