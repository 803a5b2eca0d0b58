use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::commands::download::download_report;
use crate::commands::generate::{generate_report, GenerationOutcome, MISSING_IMAGE_WARNING};
use crate::constants::MAX_UPLOAD_BYTES;
use crate::error::AppError;
use crate::input::collect_submission;
use crate::page::{render_page, PageView, DOWNLOAD_PATH, GENERATE_PATH};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(GENERATE_PATH, post(generate))
        .route(DOWNLOAD_PATH, get(download))
        .route("/health", get(|| async { "OK" }))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr.clone();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        addr = %listener.local_addr().context("listener has no local address")?,
        model = %state.config.model,
        output = %state.config.output_path.display(),
        "defect report page listening"
    );
    axum::serve(listener, router(state))
        .await
        .context("HTTP server terminated")
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let view = PageView::from_snapshot(&state.session.snapshot());
    Html(render_page(&view))
}

async fn generate(State(state): State<AppState>, multipart: Multipart) -> Response {
    let submission = match collect_submission(multipart).await {
        Ok(submission) => submission,
        Err(err) => {
            let view = PageView {
                busy: state.session.snapshot().busy,
                ..PageView::default()
            };
            return err.into_page_response(view);
        }
    };

    let mut view = PageView {
        form: submission.form.clone(),
        image_name: submission.image.as_ref().map(|image| image.file_name.clone()),
        image_preview: submission.image.as_ref().map(|image| image.data_uri()),
        ..PageView::default()
    };

    match generate_report(&state, submission.form, submission.image).await {
        Ok(GenerationOutcome::MissingImage) => {
            view.warning = Some(MISSING_IMAGE_WARNING.to_string());
            view.busy = state.session.snapshot().busy;
        }
        Ok(GenerationOutcome::Generated(report)) => {
            view.report = Some(report.text);
            view.download_available = true;
        }
        Err(err) => {
            view.busy = state.session.snapshot().busy;
            return err.into_page_response(view);
        }
    }

    Html(render_page(&view)).into_response()
}

async fn download(State(state): State<AppState>) -> Result<Response, AppError> {
    let report = download_report(&state).await?;
    let disposition = format!("attachment; filename=\"{}\"", report.file_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, report.mime_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}
