//! Keyboard chord to pad action resolution.

use super::events::KeyChord;
use crate::config::{Action, KeyBinding, KeybindingsConfig};
use std::collections::HashMap;

/// Outcome of offering a key chord to the pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The chord was bound and its action was performed
    Handled(Action),
    /// The chord is not ours; the host should process it normally
    PassThrough,
}

impl KeyDisposition {
    pub fn is_handled(&self) -> bool {
        matches!(self, KeyDisposition::Handled(_))
    }
}

/// Resolves key chords against the configured bindings.
#[derive(Debug, Clone)]
pub struct ShortcutDispatcher {
    action_map: HashMap<KeyBinding, Action>,
    hints: HashMap<Action, String>,
}

impl ShortcutDispatcher {
    /// Builds a dispatcher from `[keybindings]`.
    ///
    /// # Errors
    /// Returns the parse or duplicate-binding error from the config.
    pub fn from_config(config: &KeybindingsConfig) -> Result<Self, String> {
        let action_map = config.build_action_map()?;
        let hints = action_map
            .values()
            .filter_map(|&action| config.primary_hint(action).map(|hint| (action, hint)))
            .collect();
        Ok(Self { action_map, hints })
    }

    /// Action bound to `chord`, if any.
    pub fn resolve(&self, chord: &KeyChord) -> Option<Action> {
        let m = chord.modifiers;
        self.action_map
            .iter()
            .find(|(binding, _)| binding.matches(&chord.key, m.ctrl, m.shift, m.alt, m.meta))
            .map(|(_, action)| *action)
    }

    /// First configured chord for `action`, shown on its control.
    pub fn hint(&self, action: Action) -> Option<&str> {
        self.hints.get(&action).map(String::as_str)
    }

    pub fn binding_count(&self) -> usize {
        self.action_map.len()
    }
}

impl Default for ShortcutDispatcher {
    fn default() -> Self {
        Self::from_config(&KeybindingsConfig::default()).unwrap_or_else(|err| {
            log::error!("Default keybindings are invalid: {}", err);
            Self {
                action_map: HashMap::new(),
                hints: HashMap::new(),
            }
        })
    }
}
