use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error as ThisError;

use crate::page::{render_page, PageView};

#[derive(ThisError, Debug)]
pub enum AppError {
    /// Upload rejected by the extension filter or with an unusable name
    #[error("{message}")]
    InvalidUpload { message: String },

    /// The action control is disabled while a report is being generated
    #[error("A report is already being generated. Please wait for it to finish.")]
    GenerationInProgress,

    /// Anything that went wrong talking to the model
    #[error("Report generation failed: {0:#}")]
    Generation(anyhow::Error),

    /// Writing or re-reading the output file
    #[error("{0}")]
    Storage(String),

    /// No report from a successful generation is available
    #[error("No report is available for download. Generate a report first.")]
    ReportUnavailable,

    #[error("Failed to read form data: {0}")]
    Multipart(#[from] MultipartError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUpload { .. } => StatusCode::BAD_REQUEST,
            AppError::GenerationInProgress => StatusCode::CONFLICT,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ReportUnavailable => StatusCode::NOT_FOUND,
            AppError::Multipart(err) => err.status(),
        }
    }

    /// Renders the failure on top of `view`, so the page keeps whatever the
    /// user had already entered.
    pub fn into_page_response(self, mut view: PageView) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "request failed");
        } else {
            tracing::warn!(status = %status, error = %self, "request rejected");
        }

        view.error = Some(self.to_string());
        view.report = None;
        view.download_available = false;
        (status, Html(render_page(&view))).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_page_response(PageView::default())
    }
}
