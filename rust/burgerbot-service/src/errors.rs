use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burgerbot_core::{BoardError, PathError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The request body does not describe a usable board or position.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Well-formed request whose search settings cannot be honoured.
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        AppError::BadRequest(e.to_string())
    }
}

impl From<PathError> for AppError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::Board(b) => b.into(),
            PathError::NegativeCost { .. } => AppError::Unprocessable(e.to_string()),
            PathError::NoMatchingDirection { .. } => AppError::Internal(e.into()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorPayload,
}

#[derive(Serialize)]
struct ErrorPayload {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match self {
            AppError::BadRequest(msg) | AppError::Unprocessable(msg) => msg,
            AppError::Internal(e) => {
                error!(error = %e, "request failed");
                e.to_string()
            }
        };
        (status, Json(ErrorBody { error: ErrorPayload { code, message } })).into_response()
    }
}
