use std::{path::PathBuf, sync::Arc};

use crate::export::{
    clipboard,
    file::{self, FileSaveConfig},
    types::ExportError,
};

/// Abstraction over writing an image to a file.
pub trait ExportFileSaver: Send + Sync {
    fn save(
        &self,
        image_data: &[u8],
        filename: &str,
        config: &FileSaveConfig,
    ) -> Result<PathBuf, ExportError>;
}

/// Abstraction over copying an image to the clipboard.
pub trait ExportClipboard: Send + Sync {
    fn copy(&self, image_data: &[u8]) -> Result<(), ExportError>;
}

/// Bundle of delivery backends used by the export service. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub saver: Arc<dyn ExportFileSaver>,
    pub clipboard: Arc<dyn ExportClipboard>,
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            saver: Arc::new(DefaultFileSaver),
            clipboard: Arc::new(DefaultClipboard),
        }
    }
}

struct DefaultFileSaver;
struct DefaultClipboard;

impl ExportFileSaver for DefaultFileSaver {
    fn save(
        &self,
        image_data: &[u8],
        filename: &str,
        config: &FileSaveConfig,
    ) -> Result<PathBuf, ExportError> {
        file::save_image(image_data, filename, config)
    }
}

impl ExportClipboard for DefaultClipboard {
    fn copy(&self, image_data: &[u8]) -> Result<(), ExportError> {
        clipboard::copy_to_clipboard(image_data)
    }
}
