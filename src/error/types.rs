use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorBody;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Only PDF files are supported")]
    UnsupportedFileType,

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid upload: {message}")]
    InvalidUpload { message: String },

    #[error("File too large: exceeds limit of {limit}MB")]
    FileTooLarge { limit: usize },

    #[error("Only single-page PDFs are supported")]
    UnsupportedDocument,

    #[error("No text content found in the PDF")]
    EmptyContent,

    #[error("{message}")]
    UpstreamFailure { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            AppError::MissingFile => "MISSING_FILE",
            AppError::InvalidUpload { .. } => "INVALID_UPLOAD",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::UnsupportedDocument => "UNSUPPORTED_DOCUMENT",
            AppError::EmptyContent => "EMPTY_CONTENT",
            AppError::UpstreamFailure { .. } => "UPSTREAM_FAILURE",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnsupportedFileType => StatusCode::BAD_REQUEST,
            AppError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidUpload { .. } => StatusCode::BAD_REQUEST,
            AppError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedDocument => StatusCode::BAD_REQUEST,
            AppError::EmptyContent => StatusCode::BAD_REQUEST,
            AppError::UpstreamFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            format!("An error occurred: {}", self)
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.public_message();

        tracing::error!(
            error_code = error_code,
            status_code = %status,
            error_message = %message,
            "API error occurred"
        );

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("Background task failed: {}", err),
        }
    }
}

impl AppError {
    pub fn upstream(message: impl Into<String>) -> Self {
        AppError::UpstreamFailure {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }

    pub fn invalid_upload(message: impl Into<String>) -> Self {
        AppError::InvalidUpload {
            message: message.into(),
        }
    }
}
