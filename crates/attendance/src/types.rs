/// Shared application state
use crate::api::AttendanceApiClient;
use crate::config::AppConfig;

/// State handed to every form service handler.
pub struct AppState {
    pub config: AppConfig,
    pub api_client: AttendanceApiClient,
}
