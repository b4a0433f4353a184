use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware as mw, Router};

use crate::server::endpoints::{course, session, status};
use crate::server::middleware::*;
use crate::types::AppState;

mod endpoints;
mod middleware;
mod types;

pub use types::{ApiErrorType, RecurringSessionForm, SingleSessionForm, StatusRequest};

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Routes that talk to the attendance API on behalf of the teacher
    let course_router = Router::new()
        .route("/course/:course_id/schedule", get(course::get_schedule))
        .route("/course/:course_id/session", post(session::post_single_session))
        .route(
            "/course/:course_id/sessions/recurring",
            post(session::post_recurring_sessions),
        )
        .layer(mw::from_fn(bearer_validator::require_bearer));

    Router::new()
        .route("/health", get(status::get_health))
        .route("/session/status", post(status::post_session_status))
        .merge(course_router)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClientConfig, AttendanceApiClient};
    use crate::config::AppConfig;
    use axum::extract::State;
    use axum::Json;
    use chrono::{Datelike, Duration, Local, NaiveDate};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    type Received = Arc<Mutex<Vec<Value>>>;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Starts a fake attendance API serving `course`, then the form service in front of it.
    async fn spawn_service(course: Value) -> (String, Received) {
        let received: Received = Arc::default();

        let upstream = Router::new()
            .route(
                "/teacher/course/:course_id",
                get(move || {
                    let course = course.clone();
                    async move { Json(course) }
                }),
            )
            .route(
                "/teacher/course/:course_id/add-multi-session",
                post(
                    |State(received): State<Received>, Json(body): Json<Value>| async move {
                        received.lock().unwrap().push(body);
                        Json(json!([]))
                    },
                ),
            )
            .with_state(received.clone());
        let upstream_url = serve(upstream).await;

        let config = AppConfig {
            api_base_url: upstream_url,
            ..Default::default()
        };
        let api_client = AttendanceApiClient::with_config(ApiClientConfig::from(&config)).unwrap();
        let state = Arc::new(AppState { config, api_client });

        (serve(create_router(state)).await, received)
    }

    fn schedule_for_today() -> Value {
        let today = Local::now().date_naive();
        json!({
            "end_date": (today + Duration::days(13)).to_string(),
            "courseSchedules": [{
                "day_of_week": today.weekday().num_days_from_sunday(),
                "start_hour": 8, "start_min": 0, "end_hour": 9, "end_min": 0
            }]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (base, _) = spawn_service(schedule_for_today()).await;
        let body: Value = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_session_status_at_reference_time() {
        let (base, _) = spawn_service(schedule_for_today()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/session/status"))
            .json(&json!({
                "session": {
                    "session_date": "2024-05-06",
                    "start_hour": 9, "start_min": 0, "end_hour": 10, "end_min": 0,
                    "overtime_minutes_for_late": 15
                },
                "at": "2024-05-06T10:15:00"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"status": "Overtime", "color": "rgb(129 140 248)"}));
    }

    #[tokio::test]
    async fn test_course_routes_require_bearer() {
        let (base, _) = spawn_service(schedule_for_today()).await;
        let response = reqwest::get(format!("{base}/course/1/schedule")).await.unwrap();
        assert_eq!(response.status(), 401);
    }

    #[tokio::test]
    async fn test_schedule_grouped_by_day() {
        let (base, _) = spawn_service(schedule_for_today()).await;
        let body: Value = reqwest::Client::new()
            .get(format!("{base}/course/1/schedule"))
            .bearer_auth("tok")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let days = body["days"].as_array().unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0]["schedules"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recurring_sessions_expand_and_submit() {
        let (base, received) = spawn_service(schedule_for_today()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/course/1/sessions/recurring"))
            .bearer_auth("tok")
            .json(&json!({"overtime_minutes_for_late": 10}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);

        // The end date is 13 days out, so the slot's weekday falls once or twice
        // depending on whether the handler ran on the same day as the setup
        let body: Value = response.json().await.unwrap();
        let count = body["count"].as_u64().unwrap();
        assert!((1..=2).contains(&count));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        let list = received[0]["listSessionToCreate"].as_array().unwrap();
        assert_eq!(list.len() as u64, count);

        let dates: Vec<NaiveDate> = list
            .iter()
            .map(|s| s["session_date"].as_str().unwrap().parse().unwrap())
            .collect();
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::weeks(1));
        }
        for session in list {
            assert_eq!(session["end_hour"], 8);
            assert_eq!(session["end_min"], 15);
            assert_eq!(session["overtime_minutes_for_late"], 10);
        }
    }

    #[tokio::test]
    async fn test_recurring_huge_duration_is_rejected_before_submit() {
        let (base, received) = spawn_service(schedule_for_today()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/course/1/sessions/recurring"))
            .bearer_auth("tok")
            .json(&json!({"official_time_minutes": u32::MAX - 14}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        assert!(received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recurring_overflow_is_rejected_before_submit() {
        let today = Local::now().date_naive();
        let course = json!({
            "end_date": today.to_string(),
            "courseSchedules": [{
                "day_of_week": today.weekday().num_days_from_sunday(),
                "start_hour": 23, "start_min": 50, "end_hour": 23, "end_min": 59
            }]
        });
        let (base, received) = spawn_service(course).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/course/1/sessions/recurring"))
            .bearer_auth("tok")
            .json(&json!({"official_time_minutes": 30}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        assert!(received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recurring_after_course_end_creates_nothing() {
        let yesterday = Local::now().date_naive() - Duration::days(1);
        let course = json!({
            "end_date": yesterday.to_string(),
            "courseSchedules": [{"day_of_week": 1, "start_hour": 8, "start_min": 0, "end_hour": 9, "end_min": 0}]
        });
        let (base, received) = spawn_service(course).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/course/1/sessions/recurring"))
            .bearer_auth("tok")
            .json(&json!({}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["count"], 0);
        assert!(received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_session_invalid_times() {
        let (base, _) = spawn_service(schedule_for_today()).await;
        let response = reqwest::Client::new()
            .post(format!("{base}/course/1/session"))
            .bearer_auth("tok")
            .json(&json!({"session_date": "2024-09-02", "start_hour": 10, "end_hour": 9}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }
}
