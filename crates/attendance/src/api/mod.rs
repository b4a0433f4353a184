//! Client side of the attendance API: fetch courses, create sessions.

mod client;
mod error;
mod types;

pub use client::{ApiClientConfig, AttendanceApiClient};
pub use error::ApiError;
pub use types::{ApiErrorBody, CreateManySessionsRequest, ErrorMessage};
