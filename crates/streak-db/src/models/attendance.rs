//! Attendance database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for attendance table
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceModel {
    pub member_id: i64,
    pub problem_id: i64,
    pub qualifies: bool,
    pub recorded_at: DateTime<Utc>,
}
