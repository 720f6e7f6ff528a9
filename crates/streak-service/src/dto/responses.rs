//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use streak_core::DayStatus;

use crate::services::{TaskKind, TaskStatus};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ============================================================================
// Member Responses
// ============================================================================

/// Member profile
#[derive(Debug, Clone, Serialize)]
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_hour: Option<u8>,
    pub expired: bool,
}

/// Registration accepted; the backdated first sync runs in the background
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationResponse {
    pub member: MemberResponse,
    pub task_id: Uuid,
}

/// Result of a sequential profile refresh over all active members
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileRefreshReport {
    pub members: usize,
    pub refreshed: usize,
    pub failed: usize,
}

// ============================================================================
// Sync Responses
// ============================================================================

/// Rows written by one member sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncResponse {
    pub new_problems: usize,
    pub new_records: usize,
}

/// Result of syncing every active member
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSyncReport {
    pub members: usize,
    pub synced: usize,
    pub failed: usize,
    pub new_problems: usize,
    pub new_records: usize,
}

/// Summary of a forced fleet refresh task
#[derive(Debug, Clone, Serialize)]
pub struct FleetRefreshSummary {
    pub sync: BatchSyncReport,
    pub profiles: ProfileRefreshReport,
}

// ============================================================================
// Attendance Responses
// ============================================================================

/// One member's outcome for one day window
#[derive(Debug, Clone, Serialize)]
pub struct DailyResultResponse {
    pub member_id: i64,
    pub handle: String,
    /// Local date on which the window opens
    pub date: NaiveDate,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub qualified_count: usize,
    pub total_count: usize,
    pub status: DayStatus,
}

/// One member's fine for one week
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyFineResponse {
    pub member_id: i64,
    pub handle: String,
    /// Local Monday opening the week
    pub week_start: NaiveDate,
    pub days: Vec<DailyResultResponse>,
    pub failed_days: u32,
    pub base_unit: u64,
    pub amount: u64,
}

/// Fines for every member charged in a week
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReportResponse {
    pub week_start: NaiveDate,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub base_unit: u64,
    pub fines: Vec<WeeklyFineResponse>,
    pub total: u64,
    /// Members whose computation failed and were left out
    pub skipped: usize,
}

/// Daily results for every active member
#[derive(Debug, Clone, Serialize)]
pub struct DailyReportResponse {
    pub date: NaiveDate,
    pub results: Vec<DailyResultResponse>,
    pub passed: usize,
    pub failed: usize,
    pub undetermined: usize,
    pub skipped: usize,
}

/// A member who asked to be reminded now and has not qualified today
#[derive(Debug, Clone, Serialize)]
pub struct ReminderResponse {
    pub member_id: i64,
    pub account_id: String,
    pub handle: String,
    pub notice_hour: u8,
    pub qualified_count: usize,
    pub total_count: usize,
}

/// Outcome of re-evaluating non-qualifying records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequalifyResponse {
    pub examined: usize,
    pub upgraded: usize,
}

// ============================================================================
// Task Responses
// ============================================================================

/// A background task was started
#[derive(Debug, Clone, Serialize)]
pub struct TaskAcceptedResponse {
    pub task_id: Uuid,
    pub kind: TaskKind,
}

/// Snapshot of a background task
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub kind: TaskKind,
    pub started_at: DateTime<Utc>,
    #[serde(flatten)]
    pub status: TaskStatus,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub service: String,
    pub storage: bool,
    pub timestamp: DateTime<Utc>,
}

impl ReadinessResponse {
    pub fn ready(service: impl Into<String>, storage: bool) -> Self {
        Self {
            status: if storage { "ready" } else { "degraded" }.to_string(),
            service: service.into(),
            storage,
            timestamp: Utc::now(),
        }
    }
}
