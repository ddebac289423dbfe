//! Input event types delivered to the pad by its host.

use super::modifiers::Modifiers;
use crate::config::KeyBinding;
use crate::draw::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Left mouse button, pen or touch contact (draws)
    #[default]
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Pointer activity on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Contact starts at `point`
    Press { point: Point, button: MouseButton },
    /// Contact moves to `point`
    Move { point: Point },
    /// Contact ends
    Release,
    /// Contact was interrupted (pointer left the surface, touch cancelled)
    Cancel,
}

/// A key press together with the modifiers held at the time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    /// Key name as reported by the keyboard ("z", "Delete", "Escape")
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyChord {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Parses a chord written like a keybinding, e.g. "Ctrl+Z" or "Delete".
    pub fn parse(s: &str) -> Result<Self, String> {
        let binding = KeyBinding::parse(s)?;
        Ok(Self {
            key: binding.key,
            modifiers: Modifiers {
                shift: binding.shift,
                ctrl: binding.ctrl,
                alt: binding.alt,
                meta: binding.meta,
            },
        })
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = KeyBinding {
            key: self.key.clone(),
            ctrl: self.modifiers.ctrl,
            shift: self.modifiers.shift,
            alt: self.modifiers.alt,
            meta: self.modifiers.meta,
        };
        fmt::Display::fmt(&binding, f)
    }
}
