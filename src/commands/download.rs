use tracing::info;

use crate::constants::REPORT_MIME;
use crate::error::AppError;
use crate::fs_utils::read_report_file;
use crate::models::ReportDownload;
use crate::state::AppState;

/// Re-reads the output file written by the last successful generation.
pub async fn download_report(state: &AppState) -> Result<ReportDownload, AppError> {
    let report = state
        .session
        .current_report()
        .ok_or(AppError::ReportUnavailable)?;

    let bytes = read_report_file(&state.config.output_path)
        .await
        .map_err(AppError::Storage)?;

    info!(file = %report.file_name, bytes = bytes.len(), "serving report download");

    Ok(ReportDownload {
        file_name: report.file_name,
        mime_type: REPORT_MIME,
        bytes,
    })
}
