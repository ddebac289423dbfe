//! Recorded input scripts: one JSON event per line.
//!
//! ```text
//! # signature, then save it
//! {"type": "press", "x": 40, "y": 200}
//! {"type": "move", "x": 120, "y": 180, "pressure": 0.6}
//! {"type": "release"}
//! {"type": "key", "chord": "Ctrl+S"}
//! ```

use crate::input::MouseButton;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Controls a script can click directly, bypassing the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptControl {
    Undo,
    Clear,
    Copy,
    Save,
}

/// One input event of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Pointer contact starts
    Press {
        x: f64,
        y: f64,
        #[serde(default)]
        pressure: Option<f64>,
        #[serde(default)]
        button: MouseButton,
    },
    /// Pointer moves while in contact
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        pressure: Option<f64>,
    },
    /// Pointer contact ends
    Release,
    /// Pointer contact is interrupted
    Cancel,
    /// A key chord such as "Ctrl+Z" or "Delete"
    Key { chord: String },
    /// A click on one of the pad's buttons
    Click { control: ScriptControl },
    /// Ink color picker change
    Color { value: String },
    /// Brush size slider change
    Radius { value: f64 },
    /// Idle time; pending exports complete and feedback expires meanwhile
    Wait { ms: u64 },
    /// Window resize
    Viewport { width: u32 },
}

/// A parsed event with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptLine {
    pub line: usize,
    pub event: ScriptEvent,
}

/// Parses script text, skipping blank lines and `#` comments.
///
/// # Errors
/// Returns an error naming the first line that is not a valid event.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>> {
    text.lines()
        .enumerate()
        .map(|(idx, raw)| (idx + 1, raw.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, content)| {
            let event = serde_json::from_str(content)
                .with_context(|| format!("Invalid script event on line {}", line))?;
            Ok(ScriptLine { line, event })
        })
        .collect()
}

/// Reads and parses a script file.
pub fn load_script(path: &Path) -> Result<Vec<ScriptLine>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script from {}", path.display()))?;
    parse_script(&text).with_context(|| format!("Failed to parse script {}", path.display()))
}
