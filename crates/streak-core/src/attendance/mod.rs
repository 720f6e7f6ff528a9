//! Attendance rules - windows, qualification, and fines

mod calendar;
mod fine;
mod qualification;

pub use calendar::{parse_date, AttendanceCalendar, DayWindow, WeekWindow, DAY_START_HOUR, WEEK_START_MINUTES};
pub use fine::{fine_amount, DayStatus, FinePolicy};
pub use qualification::QualificationPolicy;
