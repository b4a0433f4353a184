use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::session::AttendanceSession;

/// Error body returned by every form service endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorType {
    #[serde(skip)]
    status: StatusCode,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, error, context): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            error: error.to_string(),
            context,
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Body of `POST /course/:course_id/session`.
///
/// Blank fields fall back to the form's initial values: today, 08:00 to 09:00.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleSessionForm {
    pub session_date: Option<NaiveDate>,
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    #[serde(default)]
    pub start_min: u32,
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
    #[serde(default)]
    pub end_min: u32,
    pub overtime_minutes_for_late: Option<u32>,
    pub description: Option<String>,
}

fn default_start_hour() -> u32 {
    8
}

fn default_end_hour() -> u32 {
    9
}

impl SingleSessionForm {
    pub fn into_session(self) -> AttendanceSession {
        AttendanceSession {
            session_date: self
                .session_date
                .unwrap_or_else(|| Local::now().date_naive()),
            start_hour: self.start_hour,
            start_min: self.start_min,
            end_hour: self.end_hour,
            end_min: self.end_min,
            overtime_minutes_for_late: self.overtime_minutes_for_late,
            description: self.description,
        }
    }
}

/// Body of `POST /course/:course_id/sessions/recurring`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecurringSessionForm {
    /// Falls back to `default_official_minutes` from the config
    pub official_time_minutes: Option<u32>,
    pub overtime_minutes_for_late: Option<u32>,
    pub description: Option<String>,
}

/// Body of `POST /session/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    pub session: AttendanceSession,
    /// Reference time; the local wall clock when absent
    pub at: Option<NaiveDateTime>,
}
