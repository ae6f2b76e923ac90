use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::MoviesError;

pub const INVALID_PAGE_NUMBER: &str = "Invalid `pageNumber` value";
pub const INVALID_RESULTS_PER_PAGE: &str = "Invalid `resultsPerPage` value";
pub const INVALID_ID: &str = "Invalid `id` value";
pub const INVALID_REQUEST: &str = "Invalid request";
pub const PAGE_NOT_FOUND: &str = "Page not found";
pub const MOVIE_NOT_FOUND: &str = "movie not found";
pub const INTERNAL_SERVER_ERROR: &str = "internal server error";

/// Successful payload, sent as `{success: true, data}`.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { status: StatusCode::OK, data }
    }

    pub fn created(data: T) -> Self {
        Self { status: StatusCode::CREATED, data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "success": true, "data": self.data }))).into_response()
    }
}

/// Failure envelope `{success: false, error: {message, details}}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    pub details: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, details: impl Into<String>) -> Self {
        Self { status, body: ErrorBody { message: message.into(), details: details.into() } }
    }

    pub fn bad_request(message: &str, details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, details)
    }

    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found", details)
    }
}

impl From<MoviesError> for ApiError {
    fn from(err: MoviesError) -> Self {
        match &err {
            e if e.is_validation() => ApiError::bad_request(INVALID_REQUEST, e.to_string()),
            MoviesError::NotFound => ApiError::new(StatusCode::NOT_FOUND, MOVIE_NOT_FOUND, err.to_string()),
            MoviesError::PageNotFound => ApiError::new(StatusCode::NOT_FOUND, PAGE_NOT_FOUND, err.to_string()),
            // Only the short catalog message and code leave the gateway.
            MoviesError::Internal { code, message, .. } => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_SERVER_ERROR,
                format!("{}: {}", code.description(), message),
            ),
            _ => ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR, err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "success": false, "error": self.body });
        (self.status, Json(body)).into_response()
    }
}
