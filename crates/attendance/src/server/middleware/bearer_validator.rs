use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::server::types::ApiErrorType;

/// Teacher token forwarded to the attendance API.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

/// Rejects requests without an `Authorization: Bearer` header and stores the
/// token as a request extension for the handlers.
pub async fn require_bearer(mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(parse_bearer);

    match token {
        Some(token) => {
            req.extensions_mut().insert(BearerToken(token));
            next.run(req).await
        }
        None => ApiErrorType::from((
            StatusCode::UNAUTHORIZED,
            "Missing bearer token",
            Some("Expected an 'Authorization: Bearer <token>' header".to_string()),
        ))
        .into_response(),
    }
}

fn parse_bearer(value: &str) -> Option<String> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}
