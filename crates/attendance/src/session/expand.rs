//! Expansion of a course's weekly schedule into dated session drafts.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

use super::error::{SessionError, SessionResult};
use super::types::{AttendanceSession, ScheduleSlot, DAY_NAMES};

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Options shared by every draft produced from one expansion.
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    /// Length of the official attendance window, counted from the slot start
    pub official_duration_minutes: u32,
    pub overtime_minutes_for_late: Option<u32>,
    pub description: Option<String>,
}

/// Schedule slots that fall on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySchedule {
    pub day_of_week: String,
    pub schedules: Vec<ScheduleSlot>,
}

/// Drafts one session per matching slot for every date from `today` through
/// `course_end_date`, both inclusive.
///
/// The end of each draft is the slot start plus the official duration. If any
/// draft would end past 23:59 on its own date the whole expansion is rejected,
/// so a partially valid batch is never handed to the bulk-create endpoint.
///
/// # Returns
/// * `Ok(Vec<AttendanceSession>)` - Drafts in date order; empty if the course already ended
/// * `Err(SessionError)` - On a malformed slot, a zero duration, or an end-time overflow
pub fn expand(
    today: NaiveDate,
    course_end_date: NaiveDate,
    slots: &[ScheduleSlot],
    options: &ExpandOptions,
) -> SessionResult<Vec<AttendanceSession>> {
    let duration = options.official_duration_minutes;
    if duration == 0 {
        return Err(SessionError::InvalidDuration { minutes: duration });
    }
    for slot in slots {
        slot.validate()?;
    }

    let mut drafts = Vec::new();
    for date in today.iter_days().take_while(|d| *d <= course_end_date) {
        let weekday = date.weekday().num_days_from_sunday();

        for slot in slots.iter().filter(|s| s.day_of_week == weekday) {
            let (end_hour, end_min) = end_time(date, slot, duration)?;
            drafts.push(AttendanceSession {
                session_date: date,
                start_hour: slot.start_hour,
                start_min: slot.start_min,
                end_hour,
                end_min,
                overtime_minutes_for_late: options.overtime_minutes_for_late,
                description: options.description.clone(),
            });
        }
    }

    debug!(
        from = %today,
        until = %course_end_date,
        slots = slots.len(),
        drafts = drafts.len(),
        "Expanded weekly schedule"
    );

    Ok(drafts)
}

/// Same as [`expand`], starting from the local calendar date.
pub fn expand_from_today(
    course_end_date: NaiveDate,
    slots: &[ScheduleSlot],
    options: &ExpandOptions,
) -> SessionResult<Vec<AttendanceSession>> {
    expand(Local::now().date_naive(), course_end_date, slots, options)
}

/// Start + duration as minutes past midnight, which must stay below 24:00.
fn end_time(date: NaiveDate, slot: &ScheduleSlot, duration: u32) -> SessionResult<(u32, u32)> {
    // Slot fields are validated, so the start is at most 1439
    let start_minutes = slot.start_hour * 60 + slot.start_min;
    let end_minutes = start_minutes
        .checked_add(duration)
        .filter(|m| *m < MINUTES_PER_DAY)
        .ok_or(SessionError::EndTimeOverflow {
            date,
            start_hour: slot.start_hour,
            start_min: slot.start_min,
            duration_minutes: duration,
        })?;

    Ok((end_minutes / 60, end_minutes % 60))
}

/// Groups slots by weekday, Sunday first, skipping days without slots.
pub fn group_by_day_of_week(slots: &[ScheduleSlot]) -> Vec<DaySchedule> {
    DAY_NAMES
        .iter()
        .filter_map(|name| {
            let schedules: Vec<ScheduleSlot> = slots
                .iter()
                .filter(|s| s.day_name() == Some(*name))
                .copied()
                .collect();

            if schedules.is_empty() {
                None
            } else {
                Some(DaySchedule {
                    day_of_week: name.to_string(),
                    schedules,
                })
            }
        })
        .collect()
}
