use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{HeaderMap, StatusCode},
    response::Json,
};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::middleware::request_id;
use crate::models::{
    has_pdf_extension, ErrorBody, SummarizeUpload, SummaryResult, UploadedDocument,
};
use crate::state::AppState;

/// Summarize a single-page PDF.
#[utoipa::path(
    post,
    path = "/summarize",
    tag = "summarize",
    request_body(content = SummarizeUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Summary of the document", body = SummaryResult),
        (status = 400, description = "Not a PDF, more than one page, or no text", body = ErrorBody),
        (status = 413, description = "Upload exceeds the size limit", body = ErrorBody),
        (status = 422, description = "No `file` field in the form", body = ErrorBody),
        (status = 500, description = "Extraction or model failure", body = ErrorBody)
    )
)]
pub async fn summarize_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SummaryResult>> {
    let start = Instant::now();
    let request_id = request_id(&headers);

    info!(request_id = %request_id, "Starting PDF summarization request");

    let mut multipart = multipart.map_err(|e| {
        warn!(request_id = %request_id, error = %e, "Request is not a multipart upload");
        AppError::invalid_upload(e.body_text())
    })?;

    let document = match extract_document(&mut multipart, state.max_file_size_mb()).await {
        Ok(document) => {
            info!(
                request_id = %request_id,
                file_name = %document.name,
                file_size = document.size,
                "File extracted from multipart form"
            );
            document
        }
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "Upload rejected");
            return Err(e);
        }
    };

    let result = match state.pipeline().handle(document).await {
        Ok(result) => result,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Summarization failed");
            return Err(e);
        }
    };

    info!(
        request_id = %request_id,
        summary_length = result.summary.len(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "Request completed successfully"
    );

    Ok(Json(result))
}

/// Pulls the `file` field out of the form. The extension is checked before
/// the file body is read.
async fn extract_document(
    multipart: &mut Multipart,
    limit_mb: usize,
) -> AppResult<UploadedDocument> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit_mb))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("").to_string();

        if !has_pdf_extension(&file_name) {
            return Err(AppError::UnsupportedFileType);
        }

        let data = field.bytes().await.map_err(|e| multipart_error(e, limit_mb))?;
        let document = UploadedDocument::new(file_name, data);

        tracing::debug!("Extracted file: {} ({} bytes)", document.name, document.size);

        return Ok(document);
    }

    Err(AppError::MissingFile)
}

fn multipart_error(err: MultipartError, limit_mb: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge { limit: limit_mb }
    } else {
        AppError::invalid_upload(format!("Failed to read multipart field: {}", err.body_text()))
    }
}
