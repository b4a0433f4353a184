pub mod course;
pub mod session;
pub mod status;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::ApiError;
use crate::server::types::ApiErrorType;
use crate::session::SessionError;

/// Converts ApiError to API response.
fn api_error_to_response(error: ApiError) -> Response {
    let (status, message) = match &error {
        ApiError::Session(_) => (StatusCode::BAD_REQUEST, "Invalid session"),
        ApiError::BadRequest { .. } => (
            StatusCode::BAD_REQUEST,
            "Attendance API rejected the request",
        ),
        ApiError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "Token rejected"),
        ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "Course not found"),
        _ => (StatusCode::BAD_GATEWAY, "Attendance API request failed"),
    };

    ApiErrorType::from((status, message, Some(error.to_string()))).into_response()
}

fn session_error_to_response(error: SessionError) -> Response {
    ApiErrorType::from((
        StatusCode::BAD_REQUEST,
        "Invalid session",
        Some(error.to_string()),
    ))
    .into_response()
}
