//! Attendance and fine handlers

use axum::{extract::State, Json};
use streak_service::{
    DailyReportResponse, DailyResultResponse, FineAccountant, ReminderResponse, ReminderService,
    StreakService, WeeklyFineResponse, WeeklyReportResponse,
};

use crate::extractors::{DateParam, MemberIdPath, Requester};
use crate::response::ApiResult;
use crate::state::AppState;

/// One member's day window containing the date (default: now)
///
/// GET /members/{member_id}/daily?date=YYYY-MM-DD
pub async fn member_daily(
    State(state): State<AppState>,
    MemberIdPath(member_id): MemberIdPath,
    DateParam(date): DateParam,
) -> ApiResult<Json<DailyResultResponse>> {
    let accountant = FineAccountant::new(state.service_context());
    let response = accountant.daily_result_for(member_id, date).await?;
    Ok(Json(response))
}

/// One member's fine for the week settled on the morning of the date
///
/// That week contains the previous date's day window, so a Monday resolves to
/// the week that just ended.
///
/// GET /members/{member_id}/weekly?date=YYYY-MM-DD
pub async fn member_weekly(
    State(state): State<AppState>,
    MemberIdPath(member_id): MemberIdPath,
    DateParam(date): DateParam,
) -> ApiResult<Json<WeeklyFineResponse>> {
    let accountant = FineAccountant::new(state.service_context());
    let response = accountant.weekly_fine_for(member_id, date).await?;
    Ok(Json(response))
}

/// Bring one member up to date and report their day
///
/// GET /members/{member_id}/streak?date=YYYY-MM-DD
pub async fn member_streak(
    State(state): State<AppState>,
    Requester(requester): Requester,
    MemberIdPath(member_id): MemberIdPath,
    DateParam(date): DateParam,
) -> ApiResult<Json<DailyResultResponse>> {
    let service = StreakService::new(state.service_context());
    let response = service.check_streak(&requester, member_id, date).await?;
    Ok(Json(response))
}

/// Daily results for every active member
///
/// GET /reports/daily?date=YYYY-MM-DD
pub async fn daily_report(
    State(state): State<AppState>,
    DateParam(date): DateParam,
) -> ApiResult<Json<DailyReportResponse>> {
    let accountant = FineAccountant::new(state.service_context());
    let response = accountant.daily_report(date).await?;
    Ok(Json(response))
}

/// Fines for every member charged in the week
///
/// GET /reports/weekly?date=YYYY-MM-DD
pub async fn weekly_report(
    State(state): State<AppState>,
    DateParam(date): DateParam,
) -> ApiResult<Json<WeeklyReportResponse>> {
    let accountant = FineAccountant::new(state.service_context());
    let response = accountant.weekly_report(date).await?;
    Ok(Json(response))
}

/// Members to remind this hour
///
/// GET /reminders
pub async fn due_reminders(State(state): State<AppState>) -> ApiResult<Json<Vec<ReminderResponse>>> {
    let service = ReminderService::new(state.service_context());
    let response = service.due_reminders(None).await?;
    Ok(Json(response))
}
