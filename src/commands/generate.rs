use llmapi::{LLMMessage, LLMMessageType};
use tracing::{error, info, warn};

use crate::constants::REPORT_FILE_NAME;
use crate::error::AppError;
use crate::fs_utils::write_report_file;
use crate::models::{GeneratedReport, ReportForm, UploadedImage};
use crate::prompt::build_report_prompt_for_today;
use crate::state::AppState;

pub const MISSING_IMAGE_WARNING: &str =
    "Please upload a building/structure image to generate the report.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The button was pressed without an image; nothing was sent.
    MissingImage,
    Generated(GeneratedReport),
}

/// Runs one press of the "Generate Report" button.
///
/// collect -> build prompt -> call model -> persist. The model is called at
/// most once, and only when an image is present. On any failure the output
/// file is left untouched and no report is offered for download.
pub async fn generate_report(
    state: &AppState,
    form: ReportForm,
    image: Option<UploadedImage>,
) -> Result<GenerationOutcome, AppError> {
    state.session.touch();

    let Some(image) = image else {
        warn!("report requested without an image");
        return Ok(GenerationOutcome::MissingImage);
    };

    let guard = state.session.begin_generation()?;

    info!(
        image = %image.file_name,
        image_bytes = image.size(),
        "generating structural defect report"
    );

    let prompt = build_report_prompt_for_today(&form);
    let messages = vec![LLMMessage::new(
        None,
        "Human",
        vec![
            LLMMessageType::text(prompt),
            LLMMessageType::image_bytes(&image.bytes, image.file_name.clone())
                .with_mime_type(image.mime_type.clone()),
        ],
    )];

    let reply = (state.chat)(messages).await.map_err(|err| {
        error!(error = %format!("{err:#}"), "model call failed");
        AppError::Generation(err)
    })?;
    let text = reply.text_content();

    let output_path = &state.config.output_path;
    write_report_file(output_path, &text)
        .await
        .map_err(AppError::Storage)?;

    let report = GeneratedReport {
        text,
        file_name: output_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(REPORT_FILE_NAME)
            .to_string(),
    };
    info!(
        path = %output_path.display(),
        chars = report.text.chars().count(),
        "report written"
    );

    guard.complete(report.clone());
    Ok(GenerationOutcome::Generated(report))
}
