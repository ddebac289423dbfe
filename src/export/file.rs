//! File saving for exported signatures.

use super::types::ExportError;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory the image is written to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: "sign".to_string(),
            format: "png".to_string(),
        }
    }
}

/// `~/Pictures/Signpad`, or `./Signpad` when no picture directory is known.
pub fn default_save_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Signpad")
}

/// Generate a filename from the template and the current time.
///
/// A template without format specifiers yields a fixed name, so the default
/// configuration always produces `sign.png`.
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Write image data into `config.save_directory` under `filename`.
///
/// An existing file with the same name is overwritten.
///
/// # Returns
/// Path to the saved file
pub fn save_image(
    image_data: &[u8],
    filename: &str,
    config: &FileSaveConfig,
) -> Result<PathBuf, ExportError> {
    if filename.is_empty() || filename.contains(std::path::MAIN_SEPARATOR) || filename.contains('/')
    {
        return Err(ExportError::Save(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid file name '{}'", filename),
        )));
    }

    let directory = ensure_directory_exists(&config.save_directory)?;
    let file_path = directory.join(filename);

    log::info!(
        "Saving signature to: {} ({} bytes)",
        file_path.display(),
        image_data.len()
    );

    fs::write(&file_path, image_data).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => {
            ExportError::PermissionDenied(format!("{}: {}", file_path.display(), e))
        }
        _ => ExportError::Save(e),
    })?;

    // User read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    log::debug!("File written: {} bytes", fs::metadata(&file_path)?.len());

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
