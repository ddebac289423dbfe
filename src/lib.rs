//! Freehand signature pad.
//!
//! Strokes are captured from pointer input, rendered with Cairo and can be
//! undone one at a time or cleared. The finished signature is exported as a
//! PNG to the Wayland clipboard or to a file. [`SignPad`] is the component
//! hosts drive; [`session::Session`] replays recorded input headlessly.

pub mod config;
pub mod draw;
pub mod export;
pub mod feedback;
pub mod input;
pub mod pad;
pub mod session;
pub mod ui;

pub use config::Config;
pub use pad::SignPad;
