//! Attendance record - a recorded solve of one problem by one member

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::attendance::QualificationPolicy;
use crate::entities::Member;
use crate::value_objects::{Level, MemberId, ProblemId};

/// Unique (member, problem) solve record
///
/// `qualifies` is decided once, against the member's tier at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub member_id: MemberId,
    pub problem_id: ProblemId,
    pub qualifies: bool,
    /// When the solve was recorded into this system, not when it happened on the judge
    pub recorded_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// Evaluate a new record for `member` solving a problem of `level`
    pub fn evaluate(
        member: &Member,
        problem_id: ProblemId,
        level: Level,
        policy: &QualificationPolicy,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            member_id: member.id,
            problem_id,
            qualifies: policy.qualifies(member.tier, level),
            recorded_at,
        }
    }
}

/// Count of qualifying records in a slice
pub fn qualified_count(records: &[AttendanceRecord]) -> usize {
    records.iter().filter(|r| r.qualifies).count()
}
