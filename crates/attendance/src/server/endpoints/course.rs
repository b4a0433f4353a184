use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use super::api_error_to_response;
use crate::server::middleware::bearer_validator::BearerToken;
use crate::session::group_by_day_of_week;
use crate::types::AppState;

/// GET /course/:course_id/schedule
/// Returns the course end date and its weekly schedule grouped by day
pub async fn get_schedule(
    Path(course_id): Path<String>,
    State(s): State<Arc<AppState>>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> Response {
    info!("GET /course/{}/schedule", course_id);

    match s.api_client.fetch_course(&token, &course_id).await {
        Ok(course) => {
            let days = group_by_day_of_week(&course.course_schedules);
            (
                StatusCode::OK,
                Json(json!({
                    "end_date": course.end_date,
                    "days": days,
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to fetch course {}: {}", course_id, e);
            api_error_to_response(e)
        }
    }
}
