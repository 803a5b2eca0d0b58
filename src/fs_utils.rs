use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use tokio::fs;
use tokio::fs::try_exists;

use crate::constants::{ALLOWED_IMAGE_EXTENSIONS, DEFAULT_IMAGE_MIME};

pub fn resolve_mime_type(candidate: Option<String>, path: &Path) -> String {
    if let Some(value) = candidate {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_IMAGE_MIME)
        .to_string()
}

/// Extension-only filter; file contents are never sniffed.
pub fn has_allowed_image_extension(file_name: &str) -> bool {
    Path::new(file_name.trim())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

/// Keeps the last path component of a client-supplied name. The result is
/// only used for display and MIME guessing, never joined onto a local path.
pub fn sanitize_file_name(file_name: &str) -> Option<String> {
    let trimmed = file_name.trim();
    let base = trimmed
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(trimmed)
        .trim();
    if base.is_empty() || base.contains('\0') {
        return None;
    }

    Some(base.to_string())
}

pub fn encode_preview(bytes: &[u8]) -> String {
    BASE64_ENGINE.encode(bytes)
}

/// Overwrites `path` with `contents`. Not atomic.
pub async fn write_report_file(path: &Path, contents: &str) -> Result<(), String> {
    ensure_parent_dir(path).await?;
    fs::write(path, contents)
        .await
        .map_err(|err| format!("Unable to write report file '{}': {}", path.display(), err))
}

pub async fn read_report_file(path: &Path) -> Result<Vec<u8>, String> {
    fs::read(path)
        .await
        .map_err(|err| format!("Unable to read report file '{}': {}", path.display(), err))
}

async fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };

    if !try_exists(parent)
        .await
        .map_err(|err| format!("Failed to check directory '{}': {}", parent.display(), err))?
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|err| format!("Unable to create directory '{}': {}", parent.display(), err))?;
    }
    Ok(())
}
