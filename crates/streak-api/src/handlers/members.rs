//! Member handlers
//!
//! Registration, lookup, reminder settings, expiry, and judge synchronisation.

use axum::{
    extract::{Path, State},
    Json,
};
use streak_service::{
    MemberResponse, MemberService, NoticeHourRequest, ProblemSyncEngine, RegisterRequest,
    RegistrationResponse, SyncResponse,
};

use crate::extractors::{MemberIdPath, ModeParam, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a member; the first sync runs in the background
///
/// POST /members
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<RegistrationResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// List active members
///
/// GET /members
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = MemberService::new(state.service_context());
    let response = service.list_active().await?;
    Ok(Json(response))
}

/// Get member by ID
///
/// GET /members/{member_id}
pub async fn get_member(
    State(state): State<AppState>,
    MemberIdPath(member_id): MemberIdPath,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.get_member(member_id).await?;
    Ok(Json(response))
}

/// Get member by chat-platform account
///
/// GET /members/by-account/{account_id}
pub async fn get_member_by_account(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.get_member_by_account(&account_id).await?;
    Ok(Json(response))
}

/// Expire a member; history is kept
///
/// DELETE /members/{member_id}
pub async fn expire_member(
    State(state): State<AppState>,
    MemberIdPath(member_id): MemberIdPath,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.expire_member(member_id).await?;
    Ok(Json(response))
}

/// Set or clear the reminder hour
///
/// PUT /members/{member_id}/notice-hour
pub async fn set_notice_hour(
    State(state): State<AppState>,
    MemberIdPath(member_id): MemberIdPath,
    ValidatedJson(request): ValidatedJson<NoticeHourRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.set_notice_hour(member_id, request).await?;
    Ok(Json(response))
}

/// Pull the member's solved problems from the judge
///
/// POST /members/{member_id}/sync?mode=normal|initial
pub async fn sync_member(
    State(state): State<AppState>,
    MemberIdPath(member_id): MemberIdPath,
    ModeParam(mode): ModeParam,
) -> ApiResult<Json<SyncResponse>> {
    let engine = ProblemSyncEngine::new(state.service_context());
    let response = engine.sync(member_id, mode).await?;
    Ok(Json(response))
}

/// Overwrite the member's profile from the judge
///
/// POST /members/{member_id}/profile/refresh
pub async fn refresh_profile(
    State(state): State<AppState>,
    MemberIdPath(member_id): MemberIdPath,
) -> ApiResult<Json<MemberResponse>> {
    let service = MemberService::new(state.service_context());
    let response = service.refresh_profile(member_id).await?;
    Ok(Json(response))
}
