use super::*;
use crate::config::Config;
use crate::export::testing::{MockClipboard, MockSaver, mock_dependencies};
use crate::export::{ExportService, FileSaveConfig};

fn session_with(config: &Config, saver: &MockSaver, clipboard: &MockClipboard) -> Session {
    let save_config = FileSaveConfig {
        save_directory: PathBuf::from("/tmp/signpad-test"),
        ..config.file_save_config()
    };
    let pad = SignPad::from_config(config)
        .unwrap()
        .with_export_service(ExportService::with_dependencies(
            save_config,
            mock_dependencies(saver, clipboard),
        ));
    Session::new(pad, config.ui.clone())
}

fn empty_canvas_png(config: &Config) -> Vec<u8> {
    SignPad::from_config(config).unwrap().to_image().unwrap().png
}

const SIGN_AND_SAVE: &str = r#"
# one stroke, then save
{"type": "press", "x": 40, "y": 200}
{"type": "move", "x": 120, "y": 180}
{"type": "move", "x": 200, "y": 220, "pressure": 0.5}
{"type": "release"}
{"type": "key", "chord": "Ctrl+S"}
"#;

#[test]
fn parse_skips_comments_and_blank_lines() {
    let script = parse_script(SIGN_AND_SAVE).unwrap();
    assert_eq!(script.len(), 5);
    assert_eq!(script[0].line, 3);
    assert_eq!(
        script[0].event,
        ScriptEvent::Press {
            x: 40.0,
            y: 200.0,
            pressure: None,
            button: crate::input::MouseButton::Left,
        }
    );
    assert_eq!(
        script[4].event,
        ScriptEvent::Key {
            chord: "Ctrl+S".to_string()
        }
    );
}

#[test]
fn parse_reports_offending_line() {
    let text = "{\"type\": \"release\"}\n\n{\"type\": \"teleport\"}\n";
    let err = parse_script(text).unwrap_err();
    assert!(format!("{:#}", err).contains("line 3"));

    let err = parse_script("{\"type\": \"radius\"}").unwrap_err();
    assert!(format!("{:#}", err).contains("line 1"));
}

#[test]
fn parse_all_event_kinds() {
    let text = r##"
{"type": "press", "x": 1, "y": 2, "button": "right"}
{"type": "cancel"}
{"type": "click", "control": "undo"}
{"type": "color", "value": "#ff0000"}
{"type": "radius", "value": 2.5}
{"type": "wait", "ms": 10}
{"type": "viewport", "width": 375}
"##;
    let events: Vec<_> = parse_script(text)
        .unwrap()
        .into_iter()
        .map(|line| line.event)
        .collect();
    assert_eq!(events.len(), 7);
    assert!(matches!(
        events[0],
        ScriptEvent::Press {
            button: crate::input::MouseButton::Right,
            ..
        }
    ));
    assert_eq!(
        events[2],
        ScriptEvent::Click {
            control: ScriptControl::Undo
        }
    );
    assert_eq!(events[6], ScriptEvent::Viewport { width: 375 });
}

#[tokio::test]
async fn replay_draws_and_saves() {
    let config = Config::default();
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let mut session = session_with(&config, &saver, &clipboard);
    assert_eq!(session.hub().listener_count(), 1);

    let report = session.run(&parse_script(SIGN_AND_SAVE).unwrap()).await.unwrap();

    assert_eq!(report.events, 5);
    assert_eq!(report.strokes, 1);
    assert_eq!(report.saved, vec![PathBuf::from("/tmp/signpad-test/sign.png")]);
    assert!(report.errors.is_empty());
    assert_eq!(report.labels[3], (ControlKind::Save, "Saved 👌".to_string()));

    let saved = saver.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    assert_ne!(saved[0].1, empty_canvas_png(&config));
}

#[tokio::test]
async fn export_mid_stroke_snapshots_finished_strokes_only() {
    let config = Config::default();
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let mut session = session_with(&config, &saver, &clipboard);

    let script = parse_script(
        r#"
{"type": "press", "x": 10, "y": 10}
{"type": "move", "x": 300, "y": 300}
{"type": "click", "control": "copy"}
{"type": "release"}
{"type": "click", "control": "copy"}
"#,
    )
    .unwrap();
    let report = session.run(&script).await.unwrap();

    assert_eq!(report.copies, 2);
    // Deliveries may complete in either order
    let empty = empty_canvas_png(&config);
    let copied = clipboard.copied.lock().unwrap();
    assert!(copied.contains(&empty));
    assert!(copied.iter().any(|png| *png != empty));
}

#[tokio::test]
async fn failed_copy_is_reported_and_drawing_continues() {
    let config = Config::default();
    let saver = MockSaver::default();
    let clipboard = MockClipboard {
        should_fail: true,
        ..MockClipboard::default()
    };
    let mut session = session_with(&config, &saver, &clipboard);

    let script = parse_script(
        r#"
{"type": "key", "chord": "Cmd+C"}
{"type": "press", "x": 10, "y": 10}
{"type": "move", "x": 50, "y": 50}
{"type": "release"}
"#,
    )
    .unwrap();
    let report = session.run(&script).await.unwrap();

    assert_eq!(report.copies, 0);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("Permission denied"));
    assert_eq!(report.strokes, 1);
    assert_eq!(report.labels[2].1, "Copy failed");
    assert!(report.status.contains("Permission denied"));
}

#[tokio::test]
async fn feedback_expires_during_wait() {
    let mut config = Config::default();
    config.feedback.duration_ms = 100;
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let mut session = session_with(&config, &saver, &clipboard);

    let script = parse_script(
        r#"
{"type": "key", "chord": "Ctrl+C"}
{"type": "wait", "ms": 50}
{"type": "key", "chord": "Ctrl+C"}
{"type": "wait", "ms": 400}
"#,
    )
    .unwrap();
    let report = session.run(&script).await.unwrap();

    assert_eq!(report.copies, 2);
    assert_eq!(report.labels[2], (ControlKind::Copy, "[Ctrl+C] Copy".to_string()));
}

#[tokio::test]
async fn keys_settings_and_viewport() {
    let config = Config::default();
    let saver = MockSaver::default();
    let clipboard = MockClipboard::default();
    let mut session = session_with(&config, &saver, &clipboard);

    let script = parse_script(
        r##"
{"type": "color", "value": "#ff0000"}
{"type": "radius", "value": 10}
{"type": "press", "x": 10, "y": 10}
{"type": "release"}
{"type": "press", "x": 20, "y": 20}
{"type": "release"}
{"type": "key", "chord": "Ctrl+Z"}
{"type": "key", "chord": "Ctrl+X"}
{"type": "key", "chord": "F5"}
{"type": "viewport", "width": 375}
"##,
    )
    .unwrap();
    let report = session.run(&script).await.unwrap();

    assert_eq!(report.strokes, 1);
    assert_eq!(report.passed_through, 2);
    assert_eq!(report.status, "Ink #ff0000 | Brush size 3.0 | 1 stroke");
    let labels: Vec<_> = report.labels.into_iter().map(|(_, label)| label).collect();
    assert_eq!(labels, vec!["Undo", "Clear", "Copy", "Save"]);

    let stroke = &session.pad().strokes()[0];
    assert_eq!(stroke.radius, 3.0);
}

#[tokio::test]
async fn invalid_chord_names_the_line() {
    let config = Config::default();
    let mut session = session_with(&config, &MockSaver::default(), &MockClipboard::default());
    let script = parse_script("{\"type\": \"key\", \"chord\": \"Ctrl+Shift\"}").unwrap();
    let err = session.run(&script).await.unwrap_err();
    assert!(err.to_string().contains("line 1"));
}

#[tokio::test]
async fn oversized_wait_is_an_error_naming_the_line() {
    let config = Config::default();
    let mut session = session_with(&config, &MockSaver::default(), &MockClipboard::default());
    let script = parse_script(
        "{\"type\": \"release\"}\n{\"type\": \"wait\", \"ms\": 18446744073709551615}\n",
    )
    .unwrap();
    assert_eq!(script[1].event, ScriptEvent::Wait { ms: u64::MAX });

    let err = session.run(&script).await.unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[tokio::test]
async fn keys_reach_the_pad_through_the_hub() {
    let config = Config::default();
    let mut session = session_with(&config, &MockSaver::default(), &MockClipboard::default());
    // A second registration on the same hub sees every chord too
    let observer = session.hub().register();

    let script = parse_script(
        r#"
{"type": "press", "x": 10, "y": 10}
{"type": "release"}
{"type": "press", "x": 20, "y": 20}
{"type": "release"}
{"type": "key", "chord": "Ctrl+Z"}
"#,
    )
    .unwrap();
    let report = session.run(&script).await.unwrap();

    assert_eq!(report.strokes, 1);
    assert_eq!(observer.next_chord(), Some(KeyChord::parse("Ctrl+Z").unwrap()));
    assert_eq!(observer.next_chord(), None);
}

#[test]
fn dropping_session_unmounts_pad() {
    let config = Config::default();
    let session = session_with(&config, &MockSaver::default(), &MockClipboard::default());
    let hub = session.hub().clone();
    assert_eq!(hub.listener_count(), 1);
    drop(session);
    assert_eq!(hub.listener_count(), 0);
}
