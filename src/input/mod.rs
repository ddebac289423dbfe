//! Keyboard and pointer input.
//!
//! Hosts translate their native events into [`PointerEvent`]s and
//! [`KeyChord`]s. Chords are resolved to pad actions by the
//! [`ShortcutDispatcher`] while the pad holds a registration on the
//! window's [`KeyboardHub`].

pub mod events;
pub mod hub;
pub mod modifiers;
pub mod shortcuts;

pub use events::{KeyChord, MouseButton, PointerEvent};
pub use hub::{KeyboardHub, ListenerGuard};
pub use modifiers::Modifiers;
pub use shortcuts::{KeyDisposition, ShortcutDispatcher};
