use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::*;
use crate::draw::color::{BLUE, DARK_BLUE, RED, WHITE};
use crate::draw::RasterError;
use crate::export::FileSaveConfig;
use crate::export::testing::{MockClipboard, MockSaver, mock_dependencies};
use crate::input::Modifiers;

const DELAY: Duration = Duration::from_millis(2000);

fn mock_service(saver: &MockSaver, clipboard: &MockClipboard) -> ExportService {
    let save_config = FileSaveConfig {
        save_directory: PathBuf::from("/tmp/signpad-test"),
        ..FileSaveConfig::default()
    };
    ExportService::with_dependencies(save_config, mock_dependencies(saver, clipboard))
}

fn wide_brush() -> BrushSettings {
    BrushSettings::new(
        DARK_BLUE,
        1.0,
        RadiusRange {
            min: 0.5,
            max: 10.0,
            step: 0.5,
        },
    )
}

fn cairo_pad(saver: &MockSaver, clipboard: &MockClipboard) -> SignPad {
    SignPad::new(
        CairoRaster::new(100, 100, WHITE).unwrap(),
        wide_brush(),
        mock_service(saver, clipboard),
        TransientFeedback::new(DELAY),
        ShortcutDispatcher::default(),
    )
}

fn pad() -> SignPad {
    cairo_pad(&MockSaver::default(), &MockClipboard::default())
}

/// Draws a horizontal stroke at `y` from x=10 to x=90.
fn draw_line(pad: &mut SignPad<impl RasterTarget>, y: f64) {
    assert!(pad.begin_stroke(Point::new(10.0, y)));
    for x in [30.0, 50.0, 70.0, 90.0] {
        pad.extend_stroke(Point::new(x, y));
    }
    assert!(pad.end_stroke());
}

fn pixel(pad: &mut SignPad, x: u32, y: u32) -> [u8; 4] {
    pad.surface.raster_mut().pixel(x, y).unwrap()
}

fn chord(key: &str, ctrl: bool) -> KeyChord {
    KeyChord::new(
        key,
        Modifiers {
            ctrl,
            ..Modifiers::default()
        },
    )
}

#[test]
fn n_strokes_then_n_undos_returns_to_empty_canvas() {
    let mut pad = pad();
    let empty = pad.to_image().unwrap();

    for i in 0..4 {
        draw_line(&mut pad, 10.0 + 20.0 * f64::from(i));
    }
    assert_eq!(pad.strokes().len(), 4);
    assert_ne!(pad.to_image().unwrap(), empty);

    for remaining in (0..4).rev() {
        assert!(pad.undo());
        assert_eq!(pad.strokes().len(), remaining);
    }
    assert_eq!(pad.to_image().unwrap(), empty);
    assert_eq!(pixel(&mut pad, 50, 10), [255, 255, 255, 255]);
}

#[test]
fn undo_on_empty_is_noop() {
    let mut pad = pad();
    let empty = pad.to_image().unwrap();
    assert!(!pad.undo());
    assert!(!pad.undo());
    assert!(pad.strokes().is_empty());
    assert_eq!(pad.to_image().unwrap(), empty);
}

#[test]
fn clear_is_idempotent_and_not_undoable() {
    let mut pad = pad();
    let empty = pad.to_image().unwrap();
    draw_line(&mut pad, 20.0);
    draw_line(&mut pad, 40.0);

    pad.clear();
    let once = pad.to_image().unwrap();
    pad.clear();
    assert_eq!(pad.to_image().unwrap(), once);
    assert_eq!(once, empty);

    assert!(!pad.undo());
    assert!(pad.strokes().is_empty());
}

#[test]
fn clear_drops_stroke_in_progress() {
    let mut pad = pad();
    pad.begin_stroke(Point::new(5.0, 5.0));
    pad.clear();
    assert!(!pad.is_drawing());
    assert!(!pad.end_stroke());
    assert!(pad.strokes().is_empty());
}

#[test]
fn export_excludes_unfinished_stroke() {
    let mut pad = pad();
    let empty = pad.to_image().unwrap();

    pad.begin_stroke(Point::new(10.0, 50.0));
    pad.extend_stroke(Point::new(90.0, 50.0));
    let mid_stroke = pad.to_image().unwrap();
    assert_eq!(mid_stroke, empty);
    assert_eq!(pixel(&mut pad, 50, 50), [255, 255, 255, 255]);

    pad.end_stroke();
    let finished = pad.to_image().unwrap();
    assert_ne!(finished, empty);
    assert_eq!(pixel(&mut pad, 50, 50), [0, 0, 139, 255]);
    assert_eq!((finished.width, finished.height), (100, 100));
}

#[test]
fn brush_changes_do_not_alter_finished_strokes() {
    let mut pad = pad();
    pad.set_color("#ff0000");
    pad.set_radius(2.0);
    draw_line(&mut pad, 20.0);
    let before = pad.to_image().unwrap();

    pad.set_color("#0000ff");
    pad.set_radius(5.0);
    assert_eq!(pad.to_image().unwrap(), before);
    assert_eq!(pad.strokes()[0].color, RED);
    assert_eq!(pad.strokes()[0].radius, 2.0);

    // Only strokes begun afterwards pick up the new brush
    draw_line(&mut pad, 60.0);
    assert_eq!(pad.strokes()[1].color, BLUE);
    assert_eq!(pad.strokes()[1].radius, 5.0);
}

#[test]
fn undo_after_two_brushes_shows_only_first_stroke() {
    let mut pad = pad();
    pad.set_color("red");
    pad.set_radius(2.0);
    draw_line(&mut pad, 20.0);

    pad.set_color("blue");
    pad.set_radius(5.0);
    draw_line(&mut pad, 60.0);
    assert_eq!(pixel(&mut pad, 50, 60), [0, 0, 255, 255]);
    // A radius-5 stroke covers 10px vertically
    assert_eq!(pixel(&mut pad, 50, 56), [0, 0, 255, 255]);

    assert!(pad.undo());
    assert_eq!(pad.strokes().len(), 1);
    assert_eq!(pad.strokes()[0].color, RED);
    assert_eq!(pad.strokes()[0].radius, 2.0);

    assert_eq!(pixel(&mut pad, 50, 20), [255, 0, 0, 255]);
    assert_eq!(pixel(&mut pad, 50, 18), [255, 0, 0, 255]);
    assert_eq!(pixel(&mut pad, 50, 24), [255, 255, 255, 255]);
    assert_eq!(pixel(&mut pad, 50, 60), [255, 255, 255, 255]);
    assert_eq!(pixel(&mut pad, 50, 56), [255, 255, 255, 255]);
}

#[test]
fn pointer_events_drive_stroke_lifecycle() {
    let mut pad = pad();
    let press = |x, y| PointerEvent::Press {
        point: Point::new(x, y),
        button: MouseButton::Left,
    };

    assert!(!pad.handle_pointer(PointerEvent::Press {
        point: Point::new(1.0, 1.0),
        button: MouseButton::Right,
    }));
    assert!(!pad.is_drawing());

    assert!(pad.handle_pointer(press(10.0, 10.0)));
    assert!(!pad.handle_pointer(press(20.0, 20.0)));
    assert!(pad.handle_pointer(PointerEvent::Move {
        point: Point::new(30.0, 10.0)
    }));
    assert!(pad.handle_pointer(PointerEvent::Release));
    assert_eq!(pad.strokes().len(), 1);
    assert_eq!(pad.strokes()[0].points().len(), 2);

    assert!(pad.handle_pointer(press(10.0, 40.0)));
    assert!(pad.handle_pointer(PointerEvent::Cancel));
    assert!(!pad.handle_pointer(PointerEvent::Release));
    assert_eq!(pad.strokes().len(), 1);
}

#[test]
fn delete_on_empty_canvas_changes_nothing() {
    let hub = KeyboardHub::new();
    let mut pad = pad();
    pad.mount(&hub);
    let empty = pad.to_image().unwrap();

    let disposition = pad.on_key(&KeyChord::parse("Delete").unwrap());
    assert_eq!(disposition, KeyDisposition::Handled(Action::ClearCanvas));
    assert!(pad.strokes().is_empty());
    assert_eq!(pad.to_image().unwrap(), empty);
    assert_eq!(pad.last_error(), None);
}

#[test]
fn shortcuts_clear_undo_and_cancel() {
    let hub = KeyboardHub::new();
    let mut pad = pad();
    pad.mount(&hub);

    draw_line(&mut pad, 20.0);
    draw_line(&mut pad, 40.0);
    assert!(pad.on_key(&chord("z", true)).is_handled());
    assert_eq!(pad.strokes().len(), 1);

    pad.begin_stroke(Point::new(1.0, 1.0));
    assert_eq!(
        pad.on_key(&KeyChord::parse("Escape").unwrap()),
        KeyDisposition::Handled(Action::CancelStroke)
    );
    assert!(!pad.is_drawing());

    assert!(pad.on_key(&KeyChord::parse("Delete").unwrap()).is_handled());
    assert!(pad.strokes().is_empty());
}

#[test]
fn unbound_chords_pass_through() {
    let hub = KeyboardHub::new();
    let mut pad = pad();
    pad.mount(&hub);
    draw_line(&mut pad, 20.0);

    for unbound in [chord("x", true), chord("a", false), chord("z", false), chord("Delete", true)] {
        assert_eq!(pad.on_key(&unbound), KeyDisposition::PassThrough);
    }
    assert_eq!(pad.strokes().len(), 1);
}

#[test]
fn unmounted_pad_ignores_keys() {
    let hub = KeyboardHub::new();
    let mut pad = pad();
    draw_line(&mut pad, 20.0);

    assert_eq!(
        pad.on_key(&KeyChord::parse("Delete").unwrap()),
        KeyDisposition::PassThrough
    );
    assert_eq!(pad.strokes().len(), 1);

    pad.mount(&hub);
    pad.unmount();
    assert_eq!(hub.listener_count(), 0);
    assert_eq!(
        pad.on_key(&KeyChord::parse("Delete").unwrap()),
        KeyDisposition::PassThrough
    );
    assert_eq!(pad.strokes().len(), 1);
}

#[test]
fn mount_registers_once_and_drop_deregisters() {
    let hub = KeyboardHub::new();
    let mut pad = pad();
    pad.mount(&hub);
    pad.mount(&hub);
    assert_eq!(hub.listener_count(), 1);

    let other = KeyboardHub::new();
    pad.mount(&other);
    assert_eq!(hub.listener_count(), 0);
    assert_eq!(other.listener_count(), 1);

    drop(pad);
    assert_eq!(other.listener_count(), 0);
}

#[test]
fn hub_chords_run_once_per_mounted_pad() {
    let hub = KeyboardHub::new();
    let mut pad = pad();
    draw_line(&mut pad, 20.0);
    draw_line(&mut pad, 40.0);
    draw_line(&mut pad, 60.0);

    pad.mount(&hub);
    pad.mount(&hub);
    let undo = chord("z", true);
    assert_eq!(hub.dispatch(&undo), 1);
    assert_eq!(
        pad.process_keys(),
        vec![KeyDisposition::Handled(Action::Undo)]
    );
    assert_eq!(pad.strokes().len(), 2);
    assert!(pad.process_keys().is_empty());

    assert_eq!(hub.dispatch(&chord("x", true)), 1);
    assert_eq!(pad.process_keys(), vec![KeyDisposition::PassThrough]);

    pad.unmount();
    assert_eq!(hub.dispatch(&undo), 0);
    assert!(pad.process_keys().is_empty());
    assert_eq!(pad.strokes().len(), 2);

    // Chords sent to a hub the pad moved away from never reach it
    let other = KeyboardHub::new();
    pad.mount(&hub);
    pad.mount(&other);
    assert_eq!(hub.dispatch(&KeyChord::parse("Delete").unwrap()), 0);
    assert!(pad.process_keys().is_empty());
    assert_eq!(pad.strokes().len(), 2);

    drop(pad);
    assert_eq!(other.dispatch(&undo), 0);
}

#[test]
fn unprocessed_chords_are_dropped_on_unmount() {
    let hub = KeyboardHub::new();
    let mut pad = pad();
    draw_line(&mut pad, 20.0);
    pad.mount(&hub);

    hub.dispatch(&KeyChord::parse("Delete").unwrap());
    pad.unmount();
    pad.mount(&hub);
    assert!(pad.process_keys().is_empty());
    assert_eq!(pad.strokes().len(), 1);
}

#[tokio::test]
async fn copy_acknowledges_then_resets_after_delay() {
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let mut pad = cairo_pad(&saver, &clipboard);
    draw_line(&mut pad, 20.0);
    let expected = pad.to_image().unwrap();

    let before = Instant::now();
    pad.copy_to_clipboard().await.unwrap();
    let copied_at = Instant::now();

    assert_eq!(*clipboard.copied.lock().unwrap(), vec![expected.png]);
    assert_eq!(pad.control_status(Control::Copy), ControlStatus::Acknowledged);
    assert_eq!(pad.control_status(Control::Save), ControlStatus::Idle);

    let deadline = pad.feedback().next_deadline().unwrap();
    assert!(deadline >= before + DELAY);
    assert!(deadline <= copied_at + DELAY);

    assert!(!pad.advance_feedback(deadline - Duration::from_millis(1)));
    assert_eq!(pad.control_status(Control::Copy), ControlStatus::Acknowledged);

    assert!(pad.advance_feedback(deadline));
    assert_eq!(pad.control_status(Control::Copy), ControlStatus::Idle);
}

#[test]
fn retrigger_within_window_does_not_stick() {
    let mut pad = pad();
    let start = Instant::now();
    let ok: Result<(), ExportError> = Ok(());

    pad.finish_export(Control::Copy, &ok, start);
    pad.finish_export(Control::Copy, &ok, start + DELAY / 2);

    pad.advance_feedback(start + DELAY);
    assert_eq!(pad.control_status(Control::Copy), ControlStatus::Acknowledged);

    pad.advance_feedback(start + DELAY * 2);
    assert_eq!(pad.control_status(Control::Copy), ControlStatus::Idle);
    assert_eq!(pad.feedback().next_deadline(), None);
}

#[tokio::test]
async fn failed_copy_sets_failure_indicator() {
    let saver = MockSaver::default();
    let clipboard = MockClipboard {
        should_fail: true,
        ..MockClipboard::default()
    };
    let mut pad = cairo_pad(&saver, &clipboard);
    draw_line(&mut pad, 20.0);

    let err = pad.copy_to_clipboard().await.unwrap_err();
    assert!(matches!(err, ExportError::PermissionDenied(_)));
    assert_eq!(pad.control_status(Control::Copy), ControlStatus::Failed);
    assert!(pad.last_error().unwrap().contains("Permission denied"));

    // The canvas stays interactive
    draw_line(&mut pad, 40.0);
    assert_eq!(pad.strokes().len(), 2);
}

#[tokio::test]
async fn save_uses_default_filename() {
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let mut pad = cairo_pad(&saver, &clipboard);
    draw_line(&mut pad, 20.0);

    let path = pad.save_to_file().await.unwrap();
    assert_eq!(path, PathBuf::from("/tmp/signpad-test/sign.png"));
    assert_eq!(pad.control_status(Control::Save), ControlStatus::Acknowledged);

    let saved = saver.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "sign.png");
    assert_eq!(&saved[0].1[0..4], &[137, 80, 78, 71]);
}

#[tokio::test]
async fn handle_key_runs_export_shortcuts() {
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let hub = KeyboardHub::new();
    let mut pad = cairo_pad(&saver, &clipboard);
    pad.mount(&hub);
    draw_line(&mut pad, 20.0);

    let copy = pad.handle_key(&chord("c", true)).await.unwrap();
    assert_eq!(copy, KeyDisposition::Handled(Action::CopyToClipboard));
    assert_eq!(clipboard.copied.lock().unwrap().len(), 1);

    let meta_save = KeyChord::new(
        "s",
        Modifiers {
            meta: true,
            ..Modifiers::default()
        },
    );
    let save = pad.handle_key(&meta_save).await.unwrap();
    assert_eq!(save, KeyDisposition::Handled(Action::SaveToFile));
    assert_eq!(saver.saved.lock().unwrap().len(), 1);

    assert_eq!(pad.control_status(Control::Copy), ControlStatus::Acknowledged);
    assert_eq!(pad.control_status(Control::Save), ControlStatus::Acknowledged);
}

#[tokio::test]
async fn handle_key_returns_export_failure() {
    let saver = MockSaver::default();
    let clipboard = MockClipboard {
        should_fail: true,
        ..MockClipboard::default()
    };
    let hub = KeyboardHub::new();
    let mut pad = cairo_pad(&saver, &clipboard);
    pad.mount(&hub);

    let err = pad.handle_key(&chord("c", true)).await.unwrap_err();
    assert!(matches!(err, ExportError::PermissionDenied(_)));
    assert_eq!(pad.control_status(Control::Copy), ControlStatus::Failed);
    assert!(pad.last_error().is_some());

    let undo = pad.handle_key(&chord("z", true)).await.unwrap();
    assert_eq!(undo, KeyDisposition::Handled(Action::Undo));
}

/// Raster double that records every call it receives.
#[derive(Default)]
struct RecordingRaster {
    ops: Vec<String>,
}

impl RasterTarget for RecordingRaster {
    fn dimensions(&self) -> (u32, u32) {
        (10, 10)
    }

    fn clear(&mut self) -> Result<(), RasterError> {
        self.ops.push("clear".to_string());
        Ok(())
    }

    fn draw_stroke(&mut self, stroke: &Stroke) -> Result<(), RasterError> {
        self.ops
            .push(format!("stroke {} r{}", stroke.color.to_hex(), stroke.radius));
        Ok(())
    }

    fn encode_png(&mut self) -> Result<Vec<u8>, RasterError> {
        Ok(self.ops.join(";").into_bytes())
    }
}

fn recording_pad() -> SignPad<RecordingRaster> {
    SignPad::new(
        RecordingRaster::default(),
        wide_brush(),
        mock_service(&MockSaver::default(), &MockClipboard::default()),
        TransientFeedback::new(DELAY),
        ShortcutDispatcher::default(),
    )
}

#[test]
fn every_change_replays_strokes_in_order() {
    let mut pad = recording_pad();
    pad.set_color("#ff0000");
    pad.set_radius(2.0);
    draw_line(&mut pad, 2.0);
    pad.set_color("#0000ff");
    pad.set_radius(5.0);
    draw_line(&mut pad, 6.0);

    pad.surface.raster_mut().ops.clear();
    assert!(pad.undo());
    assert_eq!(pad.surface().raster().ops, vec!["clear", "stroke #ff0000 r2"]);

    pad.surface.raster_mut().ops.clear();
    let image = pad.to_image().unwrap();
    assert_eq!(image.png, b"clear;stroke #ff0000 r2".to_vec());
}

#[test]
fn new_pad_paints_background_once() {
    let pad = recording_pad();
    assert_eq!(pad.surface().raster().ops, vec!["clear"]);
    assert_eq!(pad.brush().color(), DARK_BLUE);
    assert_eq!(pad.surface().dimensions(), (10, 10));
}
