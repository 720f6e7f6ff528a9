//! API Integration Tests
//!
//! Each test starts its own server on the in-memory store, with a mock
//! solved.ac answering judge requests. No external services are needed.
//!
//! Run with: cargo test -p streak-integration-tests --test api_tests

use reqwest::StatusCode;
use serde_json::{json, Value};
use streak_integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer,
};

/// Start a server with one registered member whose first sync has finished
async fn server_with_member(tier: i64, solved: &[(i64, i64)]) -> (TestServer, RegisterRequest, MemberResponse) {
    server_with_member_config(&[], tier, solved).await
}

async fn server_with_member_config(
    overrides: &[(&str, &str)],
    tier: i64,
    solved: &[(i64, i64)],
) -> (TestServer, RegisterRequest, MemberResponse) {
    let mut server = TestServer::start_with(overrides).await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.judge_profile(&request.handle, tier).await;
    server.judge_solved(&request.handle, solved).await;

    let response = server.post("/api/v1/members", &request).await.unwrap();
    let registration: RegistrationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let task = server.wait_for_task(registration.task_id).await.unwrap();
    assert_eq!(task.state, "succeeded", "initial sync failed: {:?}", task.error);

    (server, request, registration.member)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["storage"], true);
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_register_member() {
    let (server, request, member) = server_with_member(12, &[(1000, 5), (1001, 9)]).await;

    assert_eq!(member.handle, request.handle);
    assert_eq!(member.account_id, request.account_id);
    assert_eq!(member.tier, 12);
    assert!(!member.tier_name.is_empty());
    assert!(member.profile_image_url.starts_with("https://"));
    assert!(!member.expired);

    let response = server.get(&format!("/api/v1/members/{}", member.id)).await.unwrap();
    let fetched: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.handle, request.handle);

    let response = server
        .get(&format!("/api/v1/members/by-account/{}", request.account_id))
        .await
        .unwrap();
    let fetched: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, member.id);

    let response = server.get("/api/v1/members").await.unwrap();
    let active: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(active.len(), 1);
}

#[tokio::test]
async fn test_initial_sync_is_backdated() {
    let (server, _, member) = server_with_member(12, &[(1000, 5), (1001, 9)]).await;

    // Both records land before today's window
    let response = server
        .get(&format!("/api/v1/members/{}/daily", member.id))
        .await
        .unwrap();
    let daily: DailyResultResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(daily.member_id, member.id);
    assert_eq!(daily.total_count, 0);
    assert_eq!(daily.status, "undetermined");
    assert!(daily.window_start < daily.window_end);

    // Nothing new on a second pass
    let response = server
        .post_empty(&format!("/api/v1/members/{}/sync", member.id))
        .await
        .unwrap();
    let sync: SyncResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sync.new_problems, 0);
    assert_eq!(sync.new_records, 0);
}

#[tokio::test]
async fn test_register_duplicates() {
    let (mut server, request, _) = server_with_member(5, &[]).await;

    // Same account, different handle
    let other = RegisterRequest::unique();
    server.judge_profile(&other.handle, 5).await;
    let duplicate_account = RegisterRequest {
        account_id: request.account_id.clone(),
        handle: other.handle.clone(),
    };
    let response = server.post("/api/v1/members", &duplicate_account).await.unwrap();
    assert_error(response, StatusCode::CONFLICT, "ACCOUNT_ALREADY_REGISTERED")
        .await
        .unwrap();

    // Same handle, different account
    let duplicate_handle = RegisterRequest {
        account_id: other.account_id.clone(),
        handle: request.handle.clone(),
    };
    let response = server.post("/api/v1/members", &duplicate_handle).await.unwrap();
    assert_error(response, StatusCode::CONFLICT, "HANDLE_ALREADY_REGISTERED")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_rejections() {
    let server = TestServer::start().await.expect("Failed to start server");

    let bad_handle = RegisterRequest {
        account_id: "1".to_string(),
        handle: "a!".to_string(),
    };
    let response = server.post("/api/v1/members", &bad_handle).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    // The judge does not know this handle
    let response = server.post("/api/v1/members", &RegisterRequest::unique()).await.unwrap();
    assert_error(response, StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
        .await
        .unwrap();

    let response = server.get("/api/v1/members").await.unwrap();
    let active: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.is_empty());
}

#[tokio::test]
async fn test_member_lookup_errors() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/members/999").await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await.unwrap();

    let response = server.get("/api/v1/members/abc").await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
        .await
        .unwrap();

    let response = server.get("/api/v1/members/by-account/nobody").await.unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_MEMBER")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_notice_hour() {
    let (server, _, member) = server_with_member(5, &[]).await;
    let path = format!("/api/v1/members/{}/notice-hour", member.id);

    let response = server.put(&path, &NoticeHourRequest { hour: Some(22) }).await.unwrap();
    let updated: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.notice_hour, Some(22));

    let response = server.put(&path, &NoticeHourRequest { hour: Some(24) }).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    let response = server.put(&path, &NoticeHourRequest { hour: None }).await.unwrap();
    let cleared: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(cleared.notice_hour.is_none());
}

#[tokio::test]
async fn test_expire_member() {
    let (server, _, member) = server_with_member(5, &[]).await;

    let response = server.delete(&format!("/api/v1/members/{}", member.id)).await.unwrap();
    let expired: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(expired.expired);

    let response = server.get("/api/v1/members").await.unwrap();
    let active: Vec<MemberResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.is_empty());

    // History is kept
    let response = server.get(&format!("/api/v1/members/{}", member.id)).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_sync_and_profile_refresh() {
    let (server, _, member) = server_with_member(7, &[(1000, 3)]).await;

    let response = server
        .post_empty(&format!("/api/v1/members/{}/sync?mode=eventually", member.id))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_QUERY_PARAMETER")
        .await
        .unwrap();

    let response = server
        .post_empty(&format!("/api/v1/members/{}/sync?mode=initial", member.id))
        .await
        .unwrap();
    let sync: SyncResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(sync.new_records, 0);

    let response = server
        .post_empty(&format!("/api/v1/members/{}/profile/refresh", member.id))
        .await
        .unwrap();
    let refreshed: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.tier, 7);
    assert_eq!(refreshed.rating, 1200);
}

// ============================================================================
// Attendance Tests
// ============================================================================

#[tokio::test]
async fn test_daily_and_weekly_by_date() {
    let (server, _, member) = server_with_member(5, &[]).await;

    let response = server
        .get(&format!("/api/v1/members/{}/daily?date=2024-01-15", member.id))
        .await
        .unwrap();
    let daily: DailyResultResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(daily.date.to_string(), "2024-01-15");
    // Before registration: never judged
    assert_eq!(daily.status, "undetermined");

    let response = server
        .get(&format!("/api/v1/members/{}/weekly?date=2024-01-17", member.id))
        .await
        .unwrap();
    let weekly: WeeklyFineResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(weekly.member_id, member.id);
    assert_eq!(weekly.failed_days, 0);
    assert_eq!(weekly.amount, 0);
    // Nobody was registered before that week, so the pool is empty
    assert_eq!(weekly.base_unit, 0);
    assert!(weekly.days.iter().all(|d| d.status == "undetermined"));
}

#[tokio::test]
async fn test_weekly_flat_base_unit() {
    let (server, _, member) =
        server_with_member_config(&[("FINE_POLICY", "flat"), ("FINE_UNIT", "500")], 5, &[]).await;

    let response = server
        .get(&format!("/api/v1/members/{}/weekly?date=2024-01-17", member.id))
        .await
        .unwrap();
    let weekly: WeeklyFineResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(weekly.base_unit, 500);
    assert_eq!(weekly.amount, 0);
}

#[tokio::test]
async fn test_malformed_date() {
    let (server, _, member) = server_with_member(5, &[]).await;

    for path in [
        format!("/api/v1/members/{}/daily?date=2024-13-01", member.id),
        format!("/api/v1/members/{}/weekly?date=yesterday", member.id),
        "/api/v1/reports/daily?date=15-01-2024".to_string(),
        "/api/v1/reports/weekly?date=2024/01/15".to_string(),
    ] {
        let response = server.get(&path).await.unwrap();
        assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_reports_and_reminders() {
    let (server, _, member) = server_with_member(5, &[]).await;

    let response = server.get("/api/v1/reports/daily").await.unwrap();
    let report: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report["results"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["results"][0]["member_id"], member.id);
    assert_eq!(report["undetermined"], 1);

    // Registered this week, so not charged yet
    let response = server.get("/api/v1/reports/weekly").await.unwrap();
    let report: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(report["fines"], json!([]));
    assert_eq!(report["total"], 0);

    let response = server.get("/api/v1/reminders").await.unwrap();
    let due: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(due.is_empty());
}

// ============================================================================
// Cooldown Tests
// ============================================================================

#[tokio::test]
async fn test_streak_check() {
    let (server, request, member) = server_with_member(5, &[(1000, 1)]).await;
    let path = format!("/api/v1/members/{}/streak", member.id);

    let response = server.get(&path).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "MISSING_HEADER")
        .await
        .unwrap();

    let response = server.get_as(&path, &request.account_id).await.unwrap();
    let daily: DailyResultResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(daily.handle, request.handle);

    let response = server.get_as(&path, &request.account_id).await.unwrap();
    assert!(response.headers().contains_key("retry-after"));
    let body = assert_error(response, StatusCode::TOO_MANY_REQUESTS, "COOLING_DOWN")
        .await
        .unwrap();
    let secs = body.error.details.unwrap()["retry_after_secs"].as_i64().unwrap();
    assert!((1..=300).contains(&secs));

    // The cooldown is per requester
    let response = server.get_as(&path, "someone-else").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_force_refresh() {
    let (server, _, _) = server_with_member(5, &[(1000, 1)]).await;

    let response = server.post_empty("/api/v1/refresh").await.unwrap();
    let accepted: TaskAcceptedResponse = assert_json(response, StatusCode::ACCEPTED).await.unwrap();
    assert_eq!(accepted.kind, "fleet_refresh");

    let task = server.wait_for_task(accepted.task_id).await.unwrap();
    assert_eq!(task.id, accepted.task_id);
    assert_eq!(task.state, "succeeded");
    let summary = task.summary.unwrap();
    assert_eq!(summary["sync"]["members"], 1);
    assert_eq!(summary["profiles"]["refreshed"], 1);

    let response = server.post_empty("/api/v1/refresh").await.unwrap();
    assert_error(response, StatusCode::TOO_MANY_REQUESTS, "COOLING_DOWN")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_cooldown_is_configurable() {
    let server = TestServer::start_with(&[("COOLDOWN_REFRESH_SECS", "0")])
        .await
        .expect("Failed to start server");

    for _ in 0..2 {
        let response = server.post_empty("/api/v1/refresh").await.unwrap();
        assert_status(response, StatusCode::ACCEPTED).await.unwrap();
    }
}

// ============================================================================
// Task and Maintenance Tests
// ============================================================================

#[tokio::test]
async fn test_task_lookup_errors() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get(&format!("/api/v1/tasks/{}", uuid::Uuid::new_v4()))
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await.unwrap();

    let response = server.get("/api/v1/tasks/not-a-uuid").await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_requalify() {
    // Gold needs level 6+: one of the two records qualifies
    let (server, _, _) = server_with_member(12, &[(1000, 5), (1001, 9)]).await;

    let response = server.post_empty("/api/v1/maintenance/requalify").await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["examined"], 1);
    assert_eq!(body["upgraded"], 0);
}
