//! Data types for the export pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// MIME type of every exported image.
pub const PNG_MIME_TYPE: &str = "image/png";

/// A rendered snapshot of the pad, ready to be delivered.
///
/// Artifacts are regenerated on every export and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Encoded PNG bytes
    pub png: Vec<u8>,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl ExportArtifact {
    pub fn mime_type(&self) -> &'static str {
        PNG_MIME_TYPE
    }

    pub fn len(&self) -> usize {
        self.png.len()
    }

    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }
}

/// Where an artifact should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDestination {
    Clipboard,
    File,
}

/// What a successful delivery produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportReceipt {
    /// One image item was written to the clipboard.
    Copied,
    /// The image was written to this path.
    Saved(PathBuf),
}

/// Errors that can occur while exporting the signature.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No clipboard is available (WAYLAND_DISPLAY not set)")]
    ClipboardUnavailable,

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Failed to save image: {0}")]
    Save(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(String),

    #[error("Export task failed: {0}")]
    Task(String),
}

impl From<crate::draw::RasterError> for ExportError {
    fn from(err: crate::draw::RasterError) -> Self {
        ExportError::Image(err.to_string())
    }
}
