//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, maintenance, members, reports};
use crate::state::AppState;

/// Create the main API router with all routes (health checks are separate)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(member_routes())
        .merge(report_routes())
        .merge(maintenance_routes())
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        // Registration and lifecycle
        .route("/members", post(members::register).get(members::list_members))
        .route("/members/by-account/:account_id", get(members::get_member_by_account))
        .route(
            "/members/:member_id",
            get(members::get_member).delete(members::expire_member),
        )
        .route("/members/:member_id/notice-hour", put(members::set_notice_hour))
        // Judge synchronisation
        .route("/members/:member_id/sync", post(members::sync_member))
        .route("/members/:member_id/profile/refresh", post(members::refresh_profile))
        // Attendance
        .route("/members/:member_id/daily", get(reports::member_daily))
        .route("/members/:member_id/weekly", get(reports::member_weekly))
        .route("/members/:member_id/streak", get(reports::member_streak))
}

/// Fleet-wide report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/reports/daily", get(reports::daily_report))
        .route("/reports/weekly", get(reports::weekly_report))
        .route("/reminders", get(reports::due_reminders))
}

/// Refresh, task, and migration routes
fn maintenance_routes() -> Router<AppState> {
    Router::new()
        .route("/refresh", post(maintenance::force_refresh))
        .route("/tasks/:task_id", get(maintenance::get_task))
        .route("/maintenance/requalify", post(maintenance::requalify))
}
