//! HTTP client for the attendance API.
//!
//! Three calls back the session form:
//! 1. GET the course, which carries its end date and weekly schedule
//! 2. POST one session drafted by hand
//! 3. POST every session expanded from the weekly schedule in a single batch
//!
//! The bearer token is passed to every call; the client holds no credentials.

use rand::Rng;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use url::Url;

use super::error::ApiError;
use super::types::{ApiErrorBody, CreateManySessionsRequest};
use crate::config::AppConfig;
use crate::session::{AttendanceSession, Course};

/// Backoff stops growing after this many doublings of the base delay.
const MAX_RETRY_DOUBLINGS: u32 = 5;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Configuration for the attendance API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the API
    pub base_url: String,
    /// Maximum attempts for idempotent reads
    pub max_fetch_attempts: u32,
    /// Base delay between attempts (exponential backoff on top)
    pub retry_base_delay: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ApiClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            max_fetch_attempts: config.max_fetch_attempts.max(1),
            retry_base_delay: config.retry_base_delay(),
            connect_timeout: config.connect_timeout(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Client for the course and session endpoints of the attendance API.
#[derive(Debug, Clone)]
pub struct AttendanceApiClient {
    client: Client,
    base_url: Url,
    config: ApiClientConfig,
}

impl AttendanceApiClient {
    /// Creates a new client with custom configuration.
    pub fn with_config(config: ApiClientConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)?;

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Fetches a course with its weekly schedule.
    ///
    /// Transient failures are retried with backoff up to `max_fetch_attempts`.
    ///
    /// # Arguments
    /// * `token` - Bearer token of the teacher
    /// * `course_id` - The course to fetch
    ///
    /// # Returns
    /// * `Ok(Course)` - The course record
    /// * `Err(ApiError)` - If every attempt fails or the error is not retryable
    pub async fn fetch_course(&self, token: &str, course_id: &str) -> Result<Course, ApiError> {
        let correlation_id = generate_correlation_id(course_id);
        let url = self.endpoint(&["teacher", "course", course_id])?;
        let start = Instant::now();
        let mut attempt = 0u32;

        info!(
            correlation_id = %correlation_id,
            course_id = %course_id,
            "Fetching course"
        );

        loop {
            attempt += 1;
            let result = self.get_course_once(&url, token).await;

            match result {
                Ok(course) => {
                    info!(
                        correlation_id = %correlation_id,
                        course_id = %course_id,
                        schedules = course.course_schedules.len(),
                        end_date = %course.end_date,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Fetched course"
                    );
                    return Ok(course);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_fetch_attempts => {
                    let delay = self.calculate_retry_delay(attempt);
                    warn!(
                        correlation_id = %correlation_id,
                        attempt = attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Course fetch failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!(
                        correlation_id = %correlation_id,
                        course_id = %course_id,
                        attempts = attempt,
                        error = %e,
                        "Course fetch failed"
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn get_course_once(&self, url: &Url, token: &str) -> Result<Course, ApiError> {
        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await?;

        let response = check_response(response).await?;
        Ok(response.json::<Course>().await?)
    }

    /// Creates a single session.
    ///
    /// The draft is validated locally first; an invalid draft never reaches the API.
    pub async fn create_session(
        &self,
        token: &str,
        course_id: &str,
        session: &AttendanceSession,
    ) -> Result<(), ApiError> {
        session.validate()?;
        let url = self.endpoint(&["teacher", "course", course_id, "add-session"])?;

        info!(
            course_id = %course_id,
            session_date = %session.session_date,
            "Creating attendance session"
        );

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, bearer(token))
            .json(session)
            .send()
            .await?;

        check_response(response).await?;
        Ok(())
    }

    /// Creates every session in `sessions` with one request.
    ///
    /// Nothing is sent when `sessions` is empty.
    pub async fn create_many_sessions(
        &self,
        token: &str,
        course_id: &str,
        sessions: &[AttendanceSession],
    ) -> Result<(), ApiError> {
        if sessions.is_empty() {
            info!(course_id = %course_id, "No sessions to create, skipping request");
            return Ok(());
        }
        for session in sessions {
            session.validate()?;
        }

        let url = self.endpoint(&["teacher", "course", course_id, "add-multi-session"])?;
        info!(
            course_id = %course_id,
            count = sessions.len(),
            "Creating attendance sessions"
        );

        let body = CreateManySessionsRequest {
            list_session_to_create: sessions.to_vec(),
        };
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, bearer(token))
            .json(&body)
            .send()
            .await?;

        check_response(response).await?;
        Ok(())
    }

    /// Joins path segments onto the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::UrlError {
                message: format!("{} cannot be a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Delay before the next course fetch: doubles per failed attempt, plus up to 20% jitter.
    fn calculate_retry_delay(&self, attempt: u32) -> Duration {
        let doublings = attempt.saturating_sub(1).min(MAX_RETRY_DOUBLINGS);
        let delay = self
            .config
            .retry_base_delay
            .saturating_mul(1 << doublings)
            .min(MAX_RETRY_DELAY);
        let jitter_ms = rand::thread_rng().gen_range(0..=delay.as_millis() as u64 / 5);
        delay + Duration::from_millis(jitter_ms)
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Maps non-success statuses to `ApiError`, surfacing the API's message.
async fn check_response(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(|body| body.message.to_string())
        .unwrap_or(text);

    debug!(status = status.as_u16(), url = %url, message = %message, "API returned an error");

    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::BadRequest { message },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized { message },
        StatusCode::NOT_FOUND => ApiError::NotFound { resource: url },
        _ => ApiError::UnexpectedResponse {
            status: status.as_u16(),
            message,
        },
    })
}

/// Short id tying together the log lines of one course fetch.
fn generate_correlation_id(course_id: &str) -> String {
    let nonce: u32 = rand::thread_rng().gen_range(0..0x100_0000);
    format!("course-{course_id}-{nonce:06x}")
}
