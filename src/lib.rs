mod commands;
mod config;
mod constants;
mod error;
mod fs_utils;
mod input;
mod logging;
mod models;
mod page;
mod prompt;
mod server;
mod session;
mod state;

pub use commands::download::download_report;
pub use commands::generate::{generate_report, GenerationOutcome, MISSING_IMAGE_WARNING};

pub use config::AppConfig;
pub use constants::{
    DEFAULT_GEMINI_ENDPOINT, DEFAULT_REPORT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TOP_K,
    REPORT_FILE_NAME, REPORT_MIME,
};
pub use error::AppError;
pub use logging::init_logger;
pub use models::{GeneratedReport, ReportDownload, ReportForm, UploadedImage};
pub use prompt::{build_report_prompt, build_report_prompt_for_today};
pub use server::{router, serve};
pub use session::{Phase, SessionHandle, SessionSnapshot};
pub use state::AppState;

pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        tracing::warn!(
            "GOOGLE_API_KEY is not set; report generation will fail until it is provided"
        );
    }
    tracing::debug!(?config, "loaded configuration");

    serve(AppState::new(config)).await
}
