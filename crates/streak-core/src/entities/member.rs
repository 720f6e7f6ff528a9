//! Member entity - a registered community member linked to a judge handle

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::DomainError;
use crate::traits::JudgeProfile;
use crate::value_objects::{MemberId, Tier};

/// Image used when the judge reports no profile picture
pub const DEFAULT_PROFILE_IMAGE: &str = "https://static.solved.ac/misc/360x360/default_profile.png";

/// Registered member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: MemberId,
    /// Chat-platform account id
    pub account_id: String,
    /// Judge handle
    pub handle: String,
    pub tier: Tier,
    pub rating: i32,
    pub solved_count: i32,
    pub bio: String,
    pub profile_image_url: String,
    pub registered_at: DateTime<Utc>,
    /// Local hour (0-23) at which the member wants a reminder, if any
    pub notice_hour: Option<u8>,
    /// Expired members are kept for history but skipped by all batch processing
    pub expired: bool,
}

impl Member {
    /// Check if the member takes part in batch processing
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.expired
    }

    /// Check if the member registered strictly before the given instant
    #[inline]
    pub fn registered_before(&self, instant: DateTime<Utc>) -> bool {
        self.registered_at < instant
    }

    /// Overwrite the judge-sourced profile fields
    pub fn apply_profile(&mut self, profile: &JudgeProfile) {
        self.tier = profile.tier;
        self.rating = profile.rating;
        self.solved_count = profile.solved_count;
        self.bio.clone_from(&profile.bio);
        self.profile_image_url = profile
            .profile_image_url
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string());
    }

    /// Set or clear the reminder hour
    pub fn set_notice_hour(&mut self, hour: Option<u8>) -> Result<(), DomainError> {
        validate_notice_hour(hour)?;
        self.notice_hour = hour;
        Ok(())
    }
}

/// Reject reminder hours outside 0..=23
pub fn validate_notice_hour(hour: Option<u8>) -> Result<(), DomainError> {
    match hour {
        Some(h) if h > 23 => Err(DomainError::ValidationError(format!(
            "notice hour must be between 0 and 23, got {h}"
        ))),
        _ => Ok(()),
    }
}

/// Member data prior to storage assigning an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub account_id: String,
    pub handle: String,
    pub tier: Tier,
    pub rating: i32,
    pub solved_count: i32,
    pub bio: String,
    pub profile_image_url: String,
    pub registered_at: DateTime<Utc>,
}

impl NewMember {
    /// Build a registration from a freshly fetched judge profile
    pub fn from_profile(
        account_id: impl Into<String>,
        handle: impl Into<String>,
        profile: &JudgeProfile,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            handle: handle.into(),
            tier: profile.tier,
            rating: profile.rating,
            solved_count: profile.solved_count,
            bio: profile.bio.clone(),
            profile_image_url: profile
                .profile_image_url
                .clone()
                .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string()),
            registered_at,
        }
    }

    /// Attach the storage-assigned id
    pub fn into_member(self, id: MemberId) -> Member {
        Member {
            id,
            account_id: self.account_id,
            handle: self.handle,
            tier: self.tier,
            rating: self.rating,
            solved_count: self.solved_count,
            bio: self.bio,
            profile_image_url: self.profile_image_url,
            registered_at: self.registered_at,
            notice_hour: None,
            expired: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(tier: i64, image: Option<&str>) -> JudgeProfile {
        JudgeProfile {
            handle: "alice".to_string(),
            tier: Tier::new(tier).unwrap(),
            rating: 1200,
            bio: "hi".to_string(),
            solved_count: 321,
            profile_image_url: image.map(String::from),
        }
    }

    #[test]
    fn test_new_member_defaults_image() {
        let member = NewMember::from_profile("acc-1", "alice", &profile(12, None), Utc::now())
            .into_member(MemberId::new(1));
        assert_eq!(member.profile_image_url, DEFAULT_PROFILE_IMAGE);
        assert!(member.is_active());
        assert!(member.notice_hour.is_none());
    }

    #[test]
    fn test_apply_profile() {
        let mut member = NewMember::from_profile("acc-1", "alice", &profile(6, None), Utc::now())
            .into_member(MemberId::new(1));
        member.apply_profile(&profile(14, Some("https://img/x.png")));
        assert_eq!(member.tier, Tier::new(14).unwrap());
        assert_eq!(member.profile_image_url, "https://img/x.png");
    }

    #[test]
    fn test_notice_hour_validation() {
        let mut member = NewMember::from_profile("acc-1", "alice", &profile(6, None), Utc::now())
            .into_member(MemberId::new(1));
        assert!(member.set_notice_hour(Some(23)).is_ok());
        assert_eq!(member.notice_hour, Some(23));
        assert!(member.set_notice_hour(Some(24)).is_err());
        assert_eq!(member.notice_hour, Some(23));
        assert!(member.set_notice_hour(None).is_ok());
        assert!(member.notice_hour.is_none());
    }
}
