use std::path::Path;

use axum::extract::Multipart;

use crate::error::AppError;
use crate::fs_utils::{has_allowed_image_extension, resolve_mime_type, sanitize_file_name};
use crate::models::{ReportForm, UploadedImage};

pub const IMAGE_FIELD: &str = "image";
pub const TITLE_FIELD: &str = "title";
pub const PREPARED_BY_FIELD: &str = "prepared_by";
pub const PREPARED_FOR_FIELD: &str = "prepared_for";

/// One submission of the page form.
#[derive(Debug, Default)]
pub struct Submission {
    pub form: ReportForm,
    pub image: Option<UploadedImage>,
}

/// Reads the multipart body. Unknown fields are ignored; an empty file part
/// (no file chosen) yields `image: None`.
pub async fn collect_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            IMAGE_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let declared_mime = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                submission.image = accept_image(&file_name, declared_mime, bytes.to_vec())?;
            }
            TITLE_FIELD => submission.form.title = field.text().await?,
            PREPARED_BY_FIELD => submission.form.prepared_by = field.text().await?,
            PREPARED_FOR_FIELD => submission.form.prepared_for = field.text().await?,
            _ => {}
        }
    }

    Ok(submission)
}

pub fn accept_image(
    file_name: &str,
    declared_mime: Option<String>,
    bytes: Vec<u8>,
) -> Result<Option<UploadedImage>, AppError> {
    // An empty file part is "no image chosen", whatever its name.
    if bytes.is_empty() {
        return Ok(None);
    }

    let file_name = sanitize_file_name(file_name).ok_or_else(|| AppError::InvalidUpload {
        message: format!("Invalid file name supplied: {}", file_name),
    })?;

    if !has_allowed_image_extension(&file_name) {
        return Err(AppError::InvalidUpload {
            message: format!(
                "Unsupported file '{}'. Upload a JPEG or PNG image (.jpeg, .jpg, .png).",
                file_name
            ),
        });
    }

    let mime_type = resolve_mime_type(declared_mime, Path::new(&file_name));
    Ok(Some(UploadedImage {
        file_name,
        mime_type,
        bytes,
    }))
}
