//! Attendance record <-> model mapper

use streak_core::entities::AttendanceRecord;
use streak_core::value_objects::{MemberId, ProblemId};

use crate::models::AttendanceModel;

/// Convert AttendanceModel to AttendanceRecord entity
impl From<AttendanceModel> for AttendanceRecord {
    fn from(model: AttendanceModel) -> Self {
        AttendanceRecord {
            member_id: MemberId::new(model.member_id),
            problem_id: ProblemId::new(model.problem_id),
            qualifies: model.qualifies,
            recorded_at: model.recorded_at,
        }
    }
}
