use crate::fs_utils::encode_preview;

/// The three free-text fields of the report form. Never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub title: String,
    pub prepared_by: String,
    pub prepared_for: String,
}

/// An uploaded structure photo, alive for a single request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// `data:` URI used for the inline preview on the page.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, encode_preview(&self.bytes))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    pub text: String,
    pub file_name: String,
}

/// Bytes served back by the download route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDownload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}
