//! Member entity <-> model mapper

use chrono::{DateTime, Utc};
use streak_core::entities::{Member, NewMember};
use streak_core::error::DomainError;
use streak_core::value_objects::{MemberId, Tier};

use crate::models::MemberModel;

/// Convert MemberModel to Member entity
impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        let corrupt = |what: String| DomainError::DatabaseError(format!("member {}: {what}", model.id));

        let tier = Tier::new(i64::from(model.tier)).map_err(|e| corrupt(e.to_string()))?;
        let notice_hour = model
            .notice_hour
            .map(|h| u8::try_from(h).map_err(|_| corrupt(format!("notice hour {h}"))))
            .transpose()?;

        Ok(Member {
            id: MemberId::new(model.id),
            account_id: model.account_id,
            handle: model.handle,
            tier,
            rating: model.rating,
            solved_count: model.solved_count,
            bio: model.bio,
            profile_image_url: model.profile_image_url,
            registered_at: model.registered_at,
            notice_hour,
            expired: model.expired,
        })
    }
}

/// Values for inserting a new member row
pub struct MemberInsert<'a> {
    pub account_id: &'a str,
    pub handle: &'a str,
    pub tier: i16,
    pub rating: i32,
    pub solved_count: i32,
    pub bio: &'a str,
    pub profile_image_url: &'a str,
    pub registered_at: DateTime<Utc>,
}

impl<'a> MemberInsert<'a> {
    pub fn new(member: &'a NewMember) -> Self {
        Self {
            account_id: &member.account_id,
            handle: &member.handle,
            tier: i16::from(member.tier.value()),
            rating: member.rating,
            solved_count: member.solved_count,
            bio: &member.bio,
            profile_image_url: &member.profile_image_url,
            registered_at: member.registered_at,
        }
    }
}

/// Values for updating the mutable columns of a member row
pub struct MemberUpdate<'a> {
    pub id: i64,
    pub tier: i16,
    pub rating: i32,
    pub solved_count: i32,
    pub bio: &'a str,
    pub profile_image_url: &'a str,
    pub notice_hour: Option<i16>,
    pub expired: bool,
}

impl<'a> MemberUpdate<'a> {
    pub fn new(member: &'a Member) -> Self {
        Self {
            id: member.id.into_inner(),
            tier: i16::from(member.tier.value()),
            rating: member.rating,
            solved_count: member.solved_count,
            bio: &member.bio,
            profile_image_url: &member.profile_image_url,
            notice_hour: member.notice_hour.map(i16::from),
            expired: member.expired,
        }
    }
}
