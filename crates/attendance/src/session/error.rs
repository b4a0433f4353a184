//! Error types for session drafting and classification.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by the pure session functions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// An hour, minute or weekday field is outside its valid range
    #[error("Invalid {field}: {value}")]
    InvalidTime { field: &'static str, value: u32 },

    /// The official attendance duration cannot produce a session
    #[error("Invalid official duration: {minutes} minutes")]
    InvalidDuration { minutes: u32 },

    /// Start + duration runs past 23:59 on the session date
    #[error(
        "Session on {date} starting at {start_hour:02}:{start_min:02} would end past midnight \
         ({duration_minutes} minutes)"
    )]
    EndTimeOverflow {
        date: NaiveDate,
        start_hour: u32,
        start_min: u32,
        duration_minutes: u32,
    },

    /// The session's start time is not strictly before its end time
    #[error("Start time {start_hour:02}:{start_min:02} is not before end time {end_hour:02}:{end_min:02}")]
    StartNotBeforeEnd {
        start_hour: u32,
        start_min: u32,
        end_hour: u32,
        end_min: u32,
    },
}

pub type SessionResult<T> = Result<T, SessionError>;
