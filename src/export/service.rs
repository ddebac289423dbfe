use std::{fmt, path::PathBuf, sync::Arc};

use tokio::task;

use crate::export::{
    dependencies::{ExportClipboard, ExportDependencies, ExportFileSaver},
    file::{self, FileSaveConfig},
    types::{ExportArtifact, ExportDestination, ExportError, ExportReceipt},
};

/// Delivers rendered artifacts to the clipboard or to disk.
///
/// The service never looks at the stroke model: callers rasterize first and
/// hand over the artifact, so a delivery in flight works on a snapshot while
/// drawing carries on. Cloning is cheap; backends are shared.
#[derive(Clone)]
pub struct ExportService {
    dependencies: Arc<ExportDependencies>,
    save_config: FileSaveConfig,
}

impl fmt::Debug for ExportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportService")
            .field("save_directory", &self.save_config.save_directory)
            .field("filename_template", &self.save_config.filename_template)
            .finish()
    }
}

impl ExportService {
    pub fn new(save_config: FileSaveConfig) -> Self {
        Self::with_dependencies(save_config, ExportDependencies::default())
    }

    /// Create a service with custom backends (useful for testing).
    pub fn with_dependencies(save_config: FileSaveConfig, dependencies: ExportDependencies) -> Self {
        Self {
            dependencies: Arc::new(dependencies),
            save_config,
        }
    }

    pub fn save_config(&self) -> &FileSaveConfig {
        &self.save_config
    }

    /// File name produced by the configured template (`sign.png` by default).
    pub fn default_filename(&self) -> String {
        file::generate_filename(&self.save_config.filename_template, &self.save_config.format)
    }

    /// Writes the artifact to the clipboard as one `image/png` item.
    pub async fn copy_to_clipboard(&self, artifact: ExportArtifact) -> Result<(), ExportError> {
        log::info!("Copying {} bytes to clipboard", artifact.len());
        copy_image(Arc::clone(&self.dependencies.clipboard), artifact.png).await
    }

    /// Writes the artifact into the save directory as `filename`.
    pub async fn save_to_file(
        &self,
        artifact: ExportArtifact,
        filename: &str,
    ) -> Result<PathBuf, ExportError> {
        save_image(
            Arc::clone(&self.dependencies.saver),
            artifact.png,
            filename.to_string(),
            self.save_config.clone(),
        )
        .await
    }

    /// Delivers to `destination`, using the default file name for files.
    pub async fn deliver(
        &self,
        artifact: ExportArtifact,
        destination: ExportDestination,
    ) -> Result<ExportReceipt, ExportError> {
        match destination {
            ExportDestination::Clipboard => self
                .copy_to_clipboard(artifact)
                .await
                .map(|()| ExportReceipt::Copied),
            ExportDestination::File => {
                let filename = self.default_filename();
                self.save_to_file(artifact, &filename)
                    .await
                    .map(ExportReceipt::Saved)
            }
        }
    }
}

async fn save_image(
    saver: Arc<dyn ExportFileSaver>,
    image_data: Vec<u8>,
    filename: String,
    config: FileSaveConfig,
) -> Result<PathBuf, ExportError> {
    task::spawn_blocking(move || saver.save(&image_data, &filename, &config))
        .await
        .map_err(|e| ExportError::Task(format!("Save task failed: {}", e)))?
}

async fn copy_image(
    clipboard: Arc<dyn ExportClipboard>,
    image_data: Vec<u8>,
) -> Result<(), ExportError> {
    task::spawn_blocking(move || clipboard.copy(&image_data))
        .await
        .map_err(|e| ExportError::Task(format!("Clipboard task failed: {}", e)))?
}
