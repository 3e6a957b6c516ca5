use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use analysis::SimilarityError;

/// Single error-handling layer for the whole request path: classifier and
/// engine failures bubble up here untouched and leave as a 500 with the raw
/// error text in `detail`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<SimilarityError> for ApiError {
    fn from(err: SimilarityError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "invalid request", detail),
            ApiError::Internal(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "analysis failed", detail)
            }
        };
        let body = Json(ErrorBody {
            error: error.to_string(),
            detail,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
