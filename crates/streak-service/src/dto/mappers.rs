//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use streak_core::entities::Member;

use crate::services::TaskInfo;

use super::responses::{MemberResponse, TaskResponse};

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.into_inner(),
            account_id: member.account_id.clone(),
            handle: member.handle.clone(),
            tier: member.tier.value(),
            tier_name: member.tier.name(),
            rating: member.rating,
            solved_count: member.solved_count,
            bio: member.bio.clone(),
            profile_image_url: member.profile_image_url.clone(),
            registered_at: member.registered_at,
            notice_hour: member.notice_hour,
            expired: member.expired,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

// ============================================================================
// Task Mappers
// ============================================================================

impl From<TaskInfo> for TaskResponse {
    fn from(info: TaskInfo) -> Self {
        Self {
            id: info.id,
            kind: info.kind,
            started_at: info.started_at,
            status: info.status,
        }
    }
}
