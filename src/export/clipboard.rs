//! Clipboard integration for copying the signature image.

use super::types::{ExportError, PNG_MIME_TYPE};
use std::process::{Command, Stdio};
use wl_clipboard_rs::copy::{MimeType, Options, Source};

/// Copy PNG image data to the Wayland clipboard as a single item.
///
/// Prefers the `wl-copy` command and falls back to wl-clipboard-rs when the
/// command is missing or fails.
///
/// # Errors
/// - [`ExportError::ClipboardUnavailable`] when no Wayland session is reachable
/// - [`ExportError::Clipboard`] when both write paths fail
pub fn copy_to_clipboard(image_data: &[u8]) -> Result<(), ExportError> {
    if std::env::var_os("WAYLAND_DISPLAY").is_none() {
        return Err(ExportError::ClipboardUnavailable);
    }

    log::debug!(
        "Attempting to copy signature to clipboard ({} bytes)",
        image_data.len()
    );

    match copy_via_command(image_data) {
        Ok(()) => {
            log::info!("Copied signature to clipboard via wl-copy");
            Ok(())
        }
        Err(err @ ExportError::PermissionDenied(_)) => Err(err),
        Err(cmd_err) => {
            log::warn!(
                "wl-copy command path failed ({}). Falling back to wl-clipboard-rs",
                cmd_err
            );
            match copy_via_library(image_data) {
                Ok(()) => {
                    log::info!("Copied signature to clipboard via wl-clipboard-rs");
                    Ok(())
                }
                Err(lib_err) => Err(ExportError::Clipboard(format!(
                    "wl-copy failed: {} ; wl-clipboard-rs failed: {}",
                    cmd_err, lib_err
                ))),
            }
        }
    }
}

fn copy_via_library(image_data: &[u8]) -> Result<(), ExportError> {
    use wl_clipboard_rs::copy::ServeRequests;

    let mut opts = Options::new();
    // Keep the data available for one paste after we return.
    opts.serve_requests(ServeRequests::Only(1));

    opts.copy(
        Source::Bytes(image_data.into()),
        MimeType::Specific(PNG_MIME_TYPE.to_string()),
    )
    .map_err(|e| ExportError::Clipboard(format!("wl-clipboard-rs error: {}", e)))?;

    Ok(())
}

fn copy_via_command(image_data: &[u8]) -> Result<(), ExportError> {
    use std::io::Write;

    let mut child = Command::new("wl-copy")
        .arg("--type")
        .arg(PNG_MIME_TYPE)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            ExportError::Clipboard(format!("Failed to spawn wl-copy (is it installed?): {}", e))
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(image_data).map_err(|e| {
            ExportError::Clipboard(format!("Failed to write to wl-copy stdin: {}", e))
        })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| ExportError::Clipboard(format!("Failed to wait for wl-copy: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.to_lowercase().contains("permission") {
            return Err(ExportError::PermissionDenied(stderr.trim().to_string()));
        }
        return Err(ExportError::Clipboard(format!("wl-copy failed: {}", stderr.trim())));
    }

    Ok(())
}
