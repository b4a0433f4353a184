use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::session_error_to_response;
use crate::server::types::StatusRequest;
use crate::session::{classify, classify_now};

/// GET /health
pub async fn get_health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
}

/// POST /session/status
///
/// Classifies a session at `at`, or at the local wall clock when omitted.
pub async fn post_session_status(Json(req): Json<StatusRequest>) -> Response {
    let result = match req.at {
        Some(at) => classify(&req.session, at),
        None => classify_now(&req.session),
    };

    match result {
        Ok(info) => (StatusCode::OK, Json(info)).into_response(),
        Err(e) => session_error_to_response(e),
    }
}
