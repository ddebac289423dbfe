//! Signature export: clipboard and file delivery.
//!
//! This module provides:
//! - [`ExportArtifact`]: a PNG snapshot of the pad
//! - Clipboard integration (`wl-copy`, falling back to wl-clipboard-rs)
//! - File saving with a configurable name template
//! - [`ExportService`]: async delivery with mockable backends

pub mod clipboard;
pub mod dependencies;
pub mod file;
pub mod types;

mod service;
#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use dependencies::{ExportClipboard, ExportDependencies, ExportFileSaver};
pub use file::FileSaveConfig;
pub use service::ExportService;
pub use types::{ExportArtifact, ExportDestination, ExportError, ExportReceipt, PNG_MIME_TYPE};
