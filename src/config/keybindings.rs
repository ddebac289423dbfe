//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable shortcut system that maps keyboard
//! chords to pad actions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// All actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ClearCanvas,
    Undo,
    CopyToClipboard,
    SaveToFile,
    CancelStroke,
}

/// A single keybinding: a key name with optional modifiers.
///
/// `meta` covers the Command key on macOS keyboards and Super elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+W", "Cmd+Z" or "Delete".
    /// Modifiers can appear in any order: "Shift+Ctrl+W", "Alt+Shift+Ctrl+W", etc.
    /// Supports spaces around '+' (e.g., "Ctrl + Z")
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut meta = false;
        let mut key_parts = Vec::new();

        for part in s_normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" | "option" => alt = true,
                "cmd" | "command" | "meta" | "super" => meta = true,
                _ => key_parts.push(part),
            }
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]: the key is '+'
        let key = key_parts.join("+");
        let key = if key.is_empty() && s_normalized.ends_with('+') {
            "+".to_string()
        } else {
            key
        };

        if key.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        Ok(Self {
            key: normalize_key_name(&key),
            ctrl,
            shift,
            alt,
            meta,
        })
    }

    /// Check if this keybinding matches a pressed key and modifier state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> bool {
        self.key.eq_ignore_ascii_case(&normalize_key_name(key))
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
            && self.meta == meta
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.meta {
            f.write_str("Cmd+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        f.write_str(&self.key)
    }
}

/// Maps aliases onto one canonical key name ("Del" → "Delete", "KeyC" → "C").
fn normalize_key_name(key: &str) -> String {
    let key = key.trim();
    match key.to_lowercase().as_str() {
        "del" | "delete" => "Delete".to_string(),
        "esc" | "escape" => "Escape".to_string(),
        "enter" | "return" => "Return".to_string(),
        "backspace" => "Backspace".to_string(),
        "space" => "Space".to_string(),
        _ => {
            // Browser-style physical key codes
            let key = match key.strip_prefix("Key") {
                Some(letter) if letter.chars().count() == 1 => letter,
                _ => key,
            };
            if key.chars().count() == 1 {
                key.to_uppercase()
            } else {
                key.to_string()
            }
        }
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// clear_canvas = ["Delete"]
/// undo = ["Ctrl+Z", "Cmd+Z"]
/// copy_to_clipboard = ["Ctrl+C", "Cmd+C"]
/// save_to_file = ["Ctrl+S", "Cmd+S"]
/// cancel_stroke = ["Escape"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_copy_to_clipboard")]
    pub copy_to_clipboard: Vec<String>,

    #[serde(default = "default_save_to_file")]
    pub save_to_file: Vec<String>,

    #[serde(default = "default_cancel_stroke")]
    pub cancel_stroke: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            clear_canvas: default_clear_canvas(),
            undo: default_undo(),
            copy_to_clipboard: default_copy_to_clipboard(),
            save_to_file: default_save_to_file(),
            cancel_stroke: default_cancel_stroke(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let mut insert_binding = |binding_str: &str, action: Action| -> Result<(), String> {
            let binding = KeyBinding::parse(binding_str)?;
            if let Some(existing_action) = map.insert(binding.clone(), action) {
                return Err(format!(
                    "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                    binding_str, existing_action, action
                ));
            }
            Ok(())
        };

        for (bindings, action) in [
            (&self.clear_canvas, Action::ClearCanvas),
            (&self.undo, Action::Undo),
            (&self.copy_to_clipboard, Action::CopyToClipboard),
            (&self.save_to_file, Action::SaveToFile),
            (&self.cancel_stroke, Action::CancelStroke),
        ] {
            for binding_str in bindings {
                insert_binding(binding_str, action)?;
            }
        }

        Ok(map)
    }

    /// First configured chord for `action`, used as the on-screen hint.
    pub fn primary_hint(&self, action: Action) -> Option<String> {
        let bindings = match action {
            Action::ClearCanvas => &self.clear_canvas,
            Action::Undo => &self.undo,
            Action::CopyToClipboard => &self.copy_to_clipboard,
            Action::SaveToFile => &self.save_to_file,
            Action::CancelStroke => &self.cancel_stroke,
        };
        bindings
            .iter()
            .find_map(|s| KeyBinding::parse(s).ok())
            .map(|binding| binding.to_string())
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_clear_canvas() -> Vec<String> {
    vec!["Delete".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string(), "Cmd+Z".to_string()]
}

fn default_copy_to_clipboard() -> Vec<String> {
    vec!["Ctrl+C".to_string(), "Cmd+C".to_string()]
}

fn default_save_to_file() -> Vec<String> {
    vec!["Ctrl+S".to_string(), "Cmd+S".to_string()]
}

fn default_cancel_stroke() -> Vec<String> {
    vec!["Escape".to_string()]
}
