//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub account_id: String,
    pub handle: String,
    pub tier: i16,
    pub rating: i32,
    pub solved_count: i32,
    pub bio: String,
    pub profile_image_url: String,
    pub registered_at: DateTime<Utc>,
    pub notice_hour: Option<i16>,
    pub expired: bool,
}
