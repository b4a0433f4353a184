/// Request and response bodies exchanged with the attendance API
use serde::{Deserialize, Serialize};

use crate::session::AttendanceSession;

/// Body of `POST /teacher/course/:id/add-multi-session`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateManySessionsRequest {
    #[serde(rename = "listSessionToCreate")]
    pub list_session_to_create: Vec<AttendanceSession>,
}

/// Error body returned by the API on 4xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,

    pub message: ErrorMessage,

    #[serde(rename = "statusCode", default)]
    pub status_code: u16,
}

/// Validation failures come back as a list of messages, everything else as one
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl std::fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorMessage::One(message) => f.write_str(message),
            ErrorMessage::Many(messages) => f.write_str(&messages.join("; ")),
        }
    }
}
