//! Form submit handlers: single session and recurring sessions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::{api_error_to_response, session_error_to_response};
use crate::server::middleware::bearer_validator::BearerToken;
use crate::server::types::{RecurringSessionForm, SingleSessionForm};
use crate::session::{expand_from_today, ExpandOptions};
use crate::types::AppState;

/// POST /course/:course_id/session
///
/// Creates one session from the single-session form.
pub async fn post_single_session(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Json(form): Json<SingleSessionForm>,
) -> Response {
    info!("POST /course/{}/session", course_id);

    let session = form.into_session();
    match s
        .api_client
        .create_session(&token, &course_id, &session)
        .await
    {
        Ok(()) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(e) => {
            error!("Failed to create session for course {}: {}", course_id, e);
            api_error_to_response(e)
        }
    }
}

/// POST /course/:course_id/sessions/recurring
///
/// Expands the course's weekly schedule from today through its end date and
/// creates every resulting session in one batch.
pub async fn post_recurring_sessions(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Extension(BearerToken(token)): Extension<BearerToken>,
    Json(form): Json<RecurringSessionForm>,
) -> Response {
    info!("POST /course/{}/sessions/recurring", course_id);

    let course = match s.api_client.fetch_course(&token, &course_id).await {
        Ok(course) => course,
        Err(e) => {
            error!("Failed to fetch course {}: {}", course_id, e);
            return api_error_to_response(e);
        }
    };

    let options = ExpandOptions {
        official_duration_minutes: form
            .official_time_minutes
            .unwrap_or(s.config.default_official_minutes),
        overtime_minutes_for_late: form.overtime_minutes_for_late,
        description: form.description,
    };

    let drafts = match expand_from_today(course.end_date, &course.course_schedules, &options) {
        Ok(drafts) => drafts,
        Err(e) => {
            warn!("Rejected recurring sessions for course {}: {}", course_id, e);
            return session_error_to_response(e);
        }
    };

    match s
        .api_client
        .create_many_sessions(&token, &course_id, &drafts)
        .await
    {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({
                "count": drafts.len(),
                "sessions": drafts,
            })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to create sessions for course {}: {}", course_id, e);
            api_error_to_response(e)
        }
    }
}
