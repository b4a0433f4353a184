/// Types for courses, weekly schedule slots and attendance sessions
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::error::{SessionError, SessionResult};

/// English day names indexed by `day_of_week` (0 = Sunday)
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Course record as returned by the attendance API.
///
/// Only the fields needed to draft sessions are kept; everything else in the
/// upstream payload is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub end_date: NaiveDate,

    #[serde(rename = "courseSchedules", default)]
    pub course_schedules: Vec<ScheduleSlot>,
}

/// One recurring weekly time block of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day_of_week: u32, // 0 = Sunday .. 6 = Saturday
    pub start_hour: u32,
    pub start_min: u32,
    pub end_hour: u32,
    pub end_min: u32,
}

impl ScheduleSlot {
    /// Checks every field against its calendar range.
    pub fn validate(&self) -> SessionResult<()> {
        if self.day_of_week > 6 {
            return Err(SessionError::InvalidTime {
                field: "day_of_week",
                value: self.day_of_week,
            });
        }
        check_hour("start_hour", self.start_hour)?;
        check_minute("start_min", self.start_min)?;
        check_hour("end_hour", self.end_hour)?;
        check_minute("end_min", self.end_min)
    }

    /// Name of the slot's weekday, e.g. "Monday".
    pub fn day_name(&self) -> Option<&'static str> {
        DAY_NAMES.get(self.day_of_week as usize).copied()
    }
}

/// A concrete dated session, either drafted locally or returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSession {
    /// Serialized as `yyyy-MM-dd`
    pub session_date: NaiveDate,
    pub start_hour: u32,
    pub start_min: u32,
    pub end_hour: u32,
    pub end_min: u32,

    /// Grace period after the end during which the session is "Overtime"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overtime_minutes_for_late: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AttendanceSession {
    /// Checks time ranges and that the start precedes the end.
    pub fn validate(&self) -> SessionResult<()> {
        let start = self.start_datetime()?;
        let end = self.end_datetime()?;
        if start >= end {
            return Err(SessionError::StartNotBeforeEnd {
                start_hour: self.start_hour,
                start_min: self.start_min,
                end_hour: self.end_hour,
                end_min: self.end_min,
            });
        }
        Ok(())
    }

    /// Session date combined with the start time, seconds zeroed.
    pub fn start_datetime(&self) -> SessionResult<NaiveDateTime> {
        Ok(self
            .session_date
            .and_time(time_of_day(self.start_hour, self.start_min, "start_hour", "start_min")?))
    }

    /// Session date combined with the end time, seconds zeroed.
    pub fn end_datetime(&self) -> SessionResult<NaiveDateTime> {
        Ok(self
            .session_date
            .and_time(time_of_day(self.end_hour, self.end_min, "end_hour", "end_min")?))
    }

    /// Grace period length, 0 when absent.
    pub fn overtime_minutes(&self) -> u32 {
        self.overtime_minutes_for_late.unwrap_or(0)
    }
}

fn time_of_day(
    hour: u32,
    minute: u32,
    hour_field: &'static str,
    min_field: &'static str,
) -> SessionResult<NaiveTime> {
    check_hour(hour_field, hour)?;
    check_minute(min_field, minute)?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(SessionError::InvalidTime {
        field: hour_field,
        value: hour,
    })
}

fn check_hour(field: &'static str, value: u32) -> SessionResult<()> {
    if value > 23 {
        return Err(SessionError::InvalidTime { field, value });
    }
    Ok(())
}

fn check_minute(field: &'static str, value: u32) -> SessionResult<()> {
    if value > 59 {
        return Err(SessionError::InvalidTime { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(start: (u32, u32), end: (u32, u32)) -> AttendanceSession {
        AttendanceSession {
            session_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            start_hour: start.0,
            start_min: start.1,
            end_hour: end.0,
            end_min: end.1,
            overtime_minutes_for_late: None,
            description: None,
        }
    }

    #[test]
    fn test_validate_accepts_ordered_times() {
        assert!(session((8, 0), (9, 0)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_equal_or_reversed_times() {
        assert!(matches!(
            session((9, 0), (9, 0)).validate(),
            Err(SessionError::StartNotBeforeEnd { .. })
        ));
        assert!(matches!(
            session((10, 0), (9, 30)).validate(),
            Err(SessionError::StartNotBeforeEnd { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_fields() {
        assert_eq!(
            session((24, 0), (9, 0)).validate(),
            Err(SessionError::InvalidTime {
                field: "start_hour",
                value: 24
            })
        );
        assert_eq!(
            session((8, 0), (9, 60)).validate(),
            Err(SessionError::InvalidTime {
                field: "end_min",
                value: 60
            })
        );
    }

    #[test]
    fn test_session_wire_format() {
        let mut s = session((8, 5), (9, 0));
        s.description = Some("Lab".to_string());
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["session_date"], "2024-03-04");
        assert_eq!(json["start_min"], 5);
        assert_eq!(json["description"], "Lab");
        assert!(json.get("overtime_minutes_for_late").is_none());
    }

    #[test]
    fn test_course_deserializes_upstream_shape() {
        let raw = r#"{
            "id": 12,
            "name": "Operating Systems",
            "end_date": "2024-06-30",
            "courseSchedules": [
                {"id": 1, "day_of_week": 1, "start_hour": 8, "start_min": 0, "end_hour": 9, "end_min": 30}
            ]
        }"#;
        let course: Course = serde_json::from_str(raw).unwrap();
        assert_eq!(course.end_date, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(course.course_schedules.len(), 1);
        assert_eq!(course.course_schedules[0].day_name(), Some("Monday"));
    }

    #[test]
    fn test_course_without_schedules() {
        let course: Course = serde_json::from_str(r#"{"end_date": "2024-06-30"}"#).unwrap();
        assert!(course.course_schedules.is_empty());
    }

    #[test]
    fn test_slot_validate_rejects_bad_weekday() {
        let slot = ScheduleSlot {
            day_of_week: 7,
            start_hour: 8,
            start_min: 0,
            end_hour: 9,
            end_min: 0,
        };
        assert_eq!(
            slot.validate(),
            Err(SessionError::InvalidTime {
                field: "day_of_week",
                value: 7
            })
        );
        assert_eq!(slot.day_name(), None);
    }
}
