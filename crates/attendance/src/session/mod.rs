/// Session drafting, recurring expansion and status classification
mod error;
mod expand;
mod status;
mod types;

pub use error::{SessionError, SessionResult};
pub use expand::{expand, expand_from_today, group_by_day_of_week, DaySchedule, ExpandOptions};
pub use status::{classify, classify_now, SessionStatus, StatusInfo};
pub use types::*;
