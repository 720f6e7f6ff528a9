//! Attendance calendar - day and week windows
//!
//! A day window runs from 06:00:00.000 local to 05:59:59.999 local the next
//! calendar day, so late-night solves count toward the previous date. A week
//! starts at local Monday 06:30 and covers the seven day windows from that Monday.
//!
//! "Local" is a fixed UTC offset for the whole community.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::error::DomainError;

/// Hour at which a day window opens
pub const DAY_START_HOUR: i64 = 6;

/// Minutes after midnight at which a week window opens (Monday 06:30)
pub const WEEK_START_MINUTES: i64 = 6 * 60 + 30;

const DEFAULT_OFFSET_HOURS: i32 = 9;

/// One accounting day, both bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayWindow {
    /// Local calendar date on which the window opens
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Seven consecutive day windows anchored at Monday 06:30 local
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: [DayWindow; 7],
}

impl WeekWindow {
    /// Local date of the Monday that opens the week
    pub fn monday(&self) -> NaiveDate {
        self.days[0].date
    }

    /// Local date of the Sunday that closes the week
    pub fn sunday(&self) -> NaiveDate {
        self.days[6].date
    }
}

/// Maps instants to attendance windows for one UTC offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceCalendar {
    offset: Duration,
}

impl AttendanceCalendar {
    /// Calendar for a whole-hour UTC offset
    pub fn with_offset_hours(hours: i32) -> Result<Self, DomainError> {
        if !(-23..=23).contains(&hours) {
            return Err(DomainError::ValidationError(format!(
                "UTC offset out of range: {hours}"
            )));
        }
        Ok(Self {
            offset: Duration::hours(i64::from(hours)),
        })
    }

    /// Offset from UTC in seconds
    pub fn offset_seconds(&self) -> i64 {
        self.offset.num_seconds()
    }

    /// Local wall-clock time of an instant
    pub fn to_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        (instant + self.offset).naive_utc()
    }

    /// Instant of a local wall-clock time
    pub fn from_local(&self, local: NaiveDateTime) -> DateTime<Utc> {
        Utc.from_utc_datetime(&(local - self.offset))
    }

    /// Local hour of an instant (0-23)
    pub fn local_hour(&self, instant: DateTime<Utc>) -> u32 {
        self.to_local(instant).hour()
    }

    /// The day window containing `instant`
    pub fn day_window(&self, instant: DateTime<Utc>) -> DayWindow {
        let date = (self.to_local(instant) - Duration::hours(DAY_START_HOUR)).date();
        self.day_window_for_date(date)
    }

    /// The day window opening at 06:00 local on `date`
    pub fn day_window_for_date(&self, date: NaiveDate) -> DayWindow {
        let start = self.from_local(date.and_time(NaiveTime::MIN) + Duration::hours(DAY_START_HOUR));
        DayWindow {
            date,
            start,
            end: start + Duration::days(1) - Duration::milliseconds(1),
        }
    }

    /// The week window containing `instant`
    ///
    /// Monday before 06:30 still belongs to the previous week.
    pub fn week_window(&self, instant: DateTime<Utc>) -> WeekWindow {
        let shifted = self.to_local(instant) - Duration::minutes(WEEK_START_MINUTES);
        let weekday = i64::from(shifted.date().weekday().num_days_from_monday());
        let monday = shifted.date() - Duration::days(weekday);

        let start = self.from_local(monday.and_time(NaiveTime::MIN) + Duration::minutes(WEEK_START_MINUTES));
        let days = std::array::from_fn(|i| self.day_window_for_date(monday + Duration::days(i as i64)));

        WeekWindow {
            start,
            end: start + Duration::days(7) - Duration::milliseconds(1),
            days,
        }
    }

    /// The week settled on the morning of `date`
    ///
    /// This is the week containing the day window of the previous date, so a
    /// Monday resolves to the week that just ended.
    pub fn week_window_for_date(&self, date: NaiveDate) -> WeekWindow {
        let previous = date - Duration::days(1);
        let reference = previous.and_time(NaiveTime::MIN) + Duration::minutes(WEEK_START_MINUTES);
        self.week_window(self.from_local(reference))
    }

    /// Whether a day's outcome can be judged
    ///
    /// The window must have fully elapsed and must have opened after the member
    /// registered. Undetermined days count as neither pass nor fail.
    pub fn is_determined(&self, day: &DayWindow, now: DateTime<Utc>, registered_at: DateTime<Utc>) -> bool {
        day.end <= now && day.start > registered_at
    }
}

impl Default for AttendanceCalendar {
    fn default() -> Self {
        Self {
            offset: Duration::hours(i64::from(DEFAULT_OFFSET_HOURS)),
        }
    }
}

/// Parse a caller-supplied `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(input.to_string()))
}
