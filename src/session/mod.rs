//! Headless pad host that replays recorded input scripts.
//!
//! A [`Session`] mounts one [`SignPad`] on a keyboard hub and feeds it
//! script events in order. Exports snapshot the image synchronously and are
//! delivered by spawned tasks, so later events keep drawing while a copy or
//! save is in flight; completions update the pad's feedback as they arrive.

mod script;

pub use script::{ScriptControl, ScriptEvent, ScriptLine, load_script, parse_script};

use crate::config::UiConfig;
use crate::draw::Point;
use crate::export::{ExportDestination, ExportError, ExportReceipt};
use crate::feedback::Control;
use crate::input::{KeyChord, KeyDisposition, KeyboardHub, PointerEvent};
use crate::pad::{SignPad, control_for, export_destination};
use crate::ui::{self, ControlKind};
use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinSet};

/// Viewport width assumed until a script reports one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;

#[cfg(test)]
mod tests;

type ExportOutcome = (Control, Result<ExportReceipt, ExportError>);

/// What a replay did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionReport {
    /// Events applied
    pub events: usize,
    /// Finalized strokes on the canvas at the end
    pub strokes: usize,
    /// Files written, in completion order
    pub saved: Vec<PathBuf>,
    /// Successful clipboard copies
    pub copies: usize,
    /// Failed exports, in completion order
    pub errors: Vec<String>,
    /// Key chords the pad did not handle
    pub passed_through: usize,
    /// Control labels at the end of the replay
    pub labels: Vec<(ControlKind, String)>,
    /// Brush and canvas summary at the end of the replay
    pub status: String,
}

pub struct Session {
    pad: SignPad,
    hub: KeyboardHub,
    ui: UiConfig,
    viewport_width: u32,
    jobs: JoinSet<ExportOutcome>,
    report: SessionReport,
}

impl Session {
    /// Mounts `pad` on a fresh keyboard hub.
    pub fn new(mut pad: SignPad, ui: UiConfig) -> Self {
        let hub = KeyboardHub::new();
        pad.mount(&hub);
        Self {
            pad,
            hub,
            ui,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            jobs: JoinSet::new(),
            report: SessionReport::default(),
        }
    }

    pub fn pad(&self) -> &SignPad {
        &self.pad
    }

    pub fn hub(&self) -> &KeyboardHub {
        &self.hub
    }

    /// Current label of every control.
    pub fn labels(&self) -> Vec<(ControlKind, String)> {
        ui::control_labels(&self.pad, self.viewport_width, &self.ui)
    }

    /// Replays `script` and waits for every export it started.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run(&mut self, script: &[ScriptLine]) -> Result<SessionReport> {
        for line in script {
            self.collect_finished();
            self.apply(line).await?;
            self.report.events += 1;
        }

        while let Some(joined) = self.jobs.join_next().await {
            self.record(joined);
        }
        self.refresh_feedback(Instant::now());

        self.report.strokes = self.pad.strokes().len();
        self.report.labels = self.labels();
        self.report.status = ui::status_line(&self.pad);
        info!(
            "Replayed {} events: {} strokes, {} saved, {} copied, {} failed",
            self.report.events,
            self.report.strokes,
            self.report.saved.len(),
            self.report.copies,
            self.report.errors.len()
        );
        Ok(self.report.clone())
    }

    async fn apply(&mut self, line: &ScriptLine) -> Result<()> {
        debug!("line {}: {:?}", line.line, line.event);
        match &line.event {
            ScriptEvent::Press {
                x,
                y,
                pressure,
                button,
            } => {
                self.pad.handle_pointer(PointerEvent::Press {
                    point: point(*x, *y, *pressure),
                    button: *button,
                });
            }
            ScriptEvent::Move { x, y, pressure } => {
                self.pad.handle_pointer(PointerEvent::Move {
                    point: point(*x, *y, *pressure),
                });
            }
            ScriptEvent::Release => {
                self.pad.handle_pointer(PointerEvent::Release);
            }
            ScriptEvent::Cancel => {
                self.pad.handle_pointer(PointerEvent::Cancel);
            }
            ScriptEvent::Key { chord } => {
                let chord = KeyChord::parse(chord)
                    .map_err(|e| anyhow!("Invalid key chord on line {}: {}", line.line, e))?;
                self.dispatch_key(&chord);
            }
            ScriptEvent::Click { control } => self.click(*control),
            ScriptEvent::Color { value } => {
                self.pad.set_color(value);
            }
            ScriptEvent::Radius { value } => {
                self.pad.set_radius(*value);
            }
            ScriptEvent::Wait { ms } => {
                let deadline = tokio::time::Instant::now()
                    .checked_add(Duration::from_millis(*ms))
                    .ok_or_else(|| {
                        anyhow!("Wait of {} ms on line {} is out of range", ms, line.line)
                    })?;
                self.wait_until(deadline).await;
            }
            ScriptEvent::Viewport { width } => {
                self.viewport_width = *width;
                debug!("Viewport {}px: {:?}", width, self.labels());
            }
        }
        Ok(())
    }

    /// Sends `chord` through the hub and applies what the pad made of it.
    fn dispatch_key(&mut self, chord: &KeyChord) {
        if self.hub.dispatch(chord) == 0 {
            debug!("No key listener for {}", chord);
            self.report.passed_through += 1;
            return;
        }
        for disposition in self.pad.process_keys() {
            match disposition {
                KeyDisposition::Handled(action) => {
                    if let Some(destination) = export_destination(action) {
                        self.start_export(destination);
                    }
                }
                KeyDisposition::PassThrough => self.report.passed_through += 1,
            }
        }
    }

    fn click(&mut self, control: ScriptControl) {
        match control {
            ScriptControl::Undo => {
                self.pad.undo();
            }
            ScriptControl::Clear => self.pad.clear(),
            ScriptControl::Copy => self.start_export(ExportDestination::Clipboard),
            ScriptControl::Save => self.start_export(ExportDestination::File),
        }
    }

    /// Snapshots the canvas now and delivers it in the background.
    fn start_export(&mut self, destination: ExportDestination) {
        let control = control_for(destination);
        let artifact = match self.pad.to_image() {
            Ok(artifact) => artifact,
            Err(e) => {
                let failed: Result<ExportReceipt, ExportError> = Err(e);
                self.finish(control, failed);
                return;
            }
        };
        let exporter = self.pad.export_service().clone();
        self.jobs.spawn(async move {
            let result = exporter.deliver(artifact, destination).await;
            (control, result)
        });
    }

    /// Sleeps until `deadline`, applying export completions as they arrive.
    async fn wait_until(&mut self, deadline: tokio::time::Instant) {
        loop {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                Some(joined) = self.jobs.join_next(), if !self.jobs.is_empty() => {
                    self.record(joined);
                }
            }
        }
        self.refresh_feedback(Instant::now());
    }

    fn collect_finished(&mut self) {
        while let Some(joined) = self.jobs.try_join_next() {
            self.record(joined);
        }
        self.refresh_feedback(Instant::now());
    }

    fn record(&mut self, joined: Result<ExportOutcome, JoinError>) {
        match joined {
            Ok((control, result)) => self.finish(control, result),
            Err(e) => {
                warn!("Export task did not complete: {}", e);
                self.report.errors.push(format!("Export task failed: {}", e));
            }
        }
    }

    fn finish(&mut self, control: Control, result: Result<ExportReceipt, ExportError>) {
        self.pad.finish_export(control, &result, Instant::now());
        match result {
            Ok(ExportReceipt::Saved(path)) => self.report.saved.push(path),
            Ok(ExportReceipt::Copied) => self.report.copies += 1,
            Err(e) => self.report.errors.push(e.to_string()),
        }
    }

    fn refresh_feedback(&mut self, now: Instant) {
        if self.pad.advance_feedback(now) {
            debug!("Feedback expired: {:?}", self.labels());
        }
    }
}

fn point(x: f64, y: f64, pressure: Option<f64>) -> Point {
    match pressure {
        Some(p) => Point::with_pressure(x, y, p),
        None => Point::new(x, y),
    }
}
