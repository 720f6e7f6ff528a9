//! Test fixtures and data generators
//!
//! Request bodies sent to the API and the response shapes tests read back.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub account_id: String,
    pub handle: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            account_id: format!("{}", 900_000 + suffix),
            handle: format!("solver_{suffix}"),
        }
    }
}

/// Notice hour request
#[derive(Debug, Serialize)]
pub struct NoticeHourRequest {
    pub hour: Option<u8>,
}

/// Member response
#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub id: i64,
    pub account_id: String,
    pub handle: String,
    pub tier: u8,
    pub tier_name: String,
    pub rating: i32,
    pub solved_count: i32,
    pub bio: String,
    pub profile_image_url: String,
    pub registered_at: DateTime<Utc>,
    pub notice_hour: Option<u8>,
    pub expired: bool,
}

/// Registration response
#[derive(Debug, Deserialize)]
pub struct RegistrationResponse {
    pub member: MemberResponse,
    pub task_id: Uuid,
}

/// Sync response
#[derive(Debug, Deserialize)]
pub struct SyncResponse {
    pub new_problems: usize,
    pub new_records: usize,
}

/// Daily result response
#[derive(Debug, Deserialize)]
pub struct DailyResultResponse {
    pub member_id: i64,
    pub handle: String,
    pub date: NaiveDate,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub qualified_count: usize,
    pub total_count: usize,
    pub status: String,
}

/// Weekly fine response
#[derive(Debug, Deserialize)]
pub struct WeeklyFineResponse {
    pub member_id: i64,
    pub week_start: NaiveDate,
    pub days: Vec<DailyResultResponse>,
    pub failed_days: u32,
    pub base_unit: u64,
    pub amount: u64,
}

/// Task accepted response
#[derive(Debug, Deserialize)]
pub struct TaskAcceptedResponse {
    pub task_id: Uuid,
    pub kind: String,
}

/// Task snapshot
#[derive(Debug, Deserialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub kind: String,
    pub state: String,
    pub summary: Option<Value>,
    pub error: Option<String>,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

/// `GET /user/show` body for a handle
pub fn judge_profile(handle: &str, tier: i64) -> Value {
    json!({
        "handle": handle,
        "tier": tier,
        "rating": 1200,
        "bio": "",
        "solvedCount": 2,
        "profileImageUrl": null
    })
}

/// `GET /search/problem` body listing `(problem_id, level)` pairs
pub fn judge_solved(problems: &[(i64, i64)]) -> Value {
    let items: Vec<Value> = problems
        .iter()
        .map(|(id, level)| json!({ "problemId": id, "titleKo": format!("Problem {id}"), "level": level }))
        .collect();
    json!({ "count": items.len(), "items": items })
}
