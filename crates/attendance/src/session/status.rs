//! Temporal status of an attendance session relative to a reference time.

use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::error::SessionResult;
use super::types::AttendanceSession;

/// Where a session stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Not started yet
    Upcoming,
    /// Between start and end, both inclusive
    Ongoing,
    /// Past the end but within the late grace period
    Overtime,
    /// Past the grace period
    Finished,
}

impl SessionStatus {
    /// Display color shown next to the status label.
    pub fn color(&self) -> &'static str {
        match self {
            SessionStatus::Upcoming => "rgb(250 204 21)",
            SessionStatus::Ongoing => "rgb(34 211 238)",
            SessionStatus::Overtime => "rgb(129 140 248)",
            SessionStatus::Finished => "rgb(74 222 128)",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Upcoming => "Upcoming",
            SessionStatus::Ongoing => "Ongoing",
            SessionStatus::Overtime => "Overtime",
            SessionStatus::Finished => "Finished",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Status label paired with its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusInfo {
    pub status: SessionStatus,
    pub color: &'static str,
}

impl From<SessionStatus> for StatusInfo {
    fn from(status: SessionStatus) -> Self {
        Self {
            status,
            color: status.color(),
        }
    }
}

/// Classifies `session` at the instant `now`.
///
/// Both boundaries of the Ongoing and Overtime windows are closed on their
/// upper side: exactly at the end the session is still Ongoing, and exactly at
/// the end of the grace period it is still Overtime.
///
/// # Returns
/// * `Ok(StatusInfo)` - The status and its color
/// * `Err(SessionError::InvalidTime)` - If an hour or minute field is out of range
pub fn classify(session: &AttendanceSession, now: NaiveDateTime) -> SessionResult<StatusInfo> {
    let start = session.start_datetime()?;
    let end = session.end_datetime()?;
    let grace_end = end + Duration::minutes(i64::from(session.overtime_minutes()));

    let status = if now < start {
        SessionStatus::Upcoming
    } else if now <= end {
        SessionStatus::Ongoing
    } else if now <= grace_end {
        SessionStatus::Overtime
    } else {
        SessionStatus::Finished
    };

    Ok(status.into())
}

/// Classifies `session` against the local wall clock.
pub fn classify_now(session: &AttendanceSession) -> SessionResult<StatusInfo> {
    classify(session, Local::now().naive_local())
}
