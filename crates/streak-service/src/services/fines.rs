//! Fine accountant
//!
//! Reads attendance records through the calendar's windows and turns them into
//! daily outcomes and weekly fines. Nothing here writes to storage.

use chrono::NaiveDate;
use tracing::{instrument, warn};

use streak_core::entities::{qualified_count, Member};
use streak_core::{fine_amount, DayStatus, DayWindow, MemberId, WeekWindow};

use crate::dto::{DailyReportResponse, DailyResultResponse, WeeklyFineResponse, WeeklyReportResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Fine accountant
pub struct FineAccountant<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FineAccountant<'a> {
    /// Create a new FineAccountant
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Day window opening on `date`, or the one in progress
    pub fn day_window(&self, date: Option<NaiveDate>) -> DayWindow {
        let calendar = self.ctx.calendar();
        match date {
            Some(date) => calendar.day_window_for_date(date),
            None => calendar.day_window(self.ctx.now()),
        }
    }

    /// Week settled on the morning of `date`, or the one in progress
    pub fn week_window(&self, date: Option<NaiveDate>) -> WeekWindow {
        let calendar = self.ctx.calendar();
        match date {
            Some(date) => calendar.week_window_for_date(date),
            None => calendar.week_window(self.ctx.now()),
        }
    }

    /// Outcome of one day window for one member
    ///
    /// Bounds are inclusive. A window that has not fully elapsed, or that opened
    /// before the member registered, is undetermined.
    #[instrument(skip(self, member, day), fields(member_id = %member.id, date = %day.date))]
    pub async fn daily_result(&self, member: &Member, day: &DayWindow) -> ServiceResult<DailyResultResponse> {
        let records = self
            .ctx
            .attendance_repo()
            .find_in_range(member.id, day.start, day.end)
            .await?;

        let qualified = qualified_count(&records);
        let determined = self
            .ctx
            .calendar()
            .is_determined(day, self.ctx.now(), member.registered_at);

        Ok(DailyResultResponse {
            member_id: member.id.into_inner(),
            handle: member.handle.clone(),
            date: day.date,
            window_start: day.start,
            window_end: day.end,
            qualified_count: qualified,
            total_count: records.len(),
            status: DayStatus::from_counts(determined, qualified),
        })
    }

    /// Daily result by member id for a caller-supplied date
    pub async fn daily_result_for(
        &self,
        member_id: MemberId,
        date: Option<NaiveDate>,
    ) -> ServiceResult<DailyResultResponse> {
        let member = self.find_member(member_id).await?;
        self.daily_result(&member, &self.day_window(date)).await
    }

    /// Fine for one member over one week: `2^failed_days * base_unit`
    #[instrument(skip(self, member, week), fields(member_id = %member.id, week = %week.monday()))]
    pub async fn weekly_fine(
        &self,
        member: &Member,
        week: &WeekWindow,
        base_unit: u64,
    ) -> ServiceResult<WeeklyFineResponse> {
        let mut days = Vec::with_capacity(week.days.len());
        for day in &week.days {
            days.push(self.daily_result(member, day).await?);
        }

        let failed_days = days.iter().filter(|d| d.status == DayStatus::Fail).count() as u32;

        Ok(WeeklyFineResponse {
            member_id: member.id.into_inner(),
            handle: member.handle.clone(),
            week_start: week.monday(),
            days,
            failed_days,
            base_unit,
            amount: fine_amount(failed_days, base_unit),
        })
    }

    /// Weekly fine by member id, with the base unit the weekly report would use
    pub async fn weekly_fine_for(
        &self,
        member_id: MemberId,
        date: Option<NaiveDate>,
    ) -> ServiceResult<WeeklyFineResponse> {
        let member = self.find_member(member_id).await?;
        let week = self.week_window(date);
        let charged = self.charged_members(&week).await?;
        let base_unit = self.ctx.fine_policy().base_unit(charged.len());
        self.weekly_fine(&member, &week, base_unit).await
    }

    /// Fines for the given members over one week
    ///
    /// Members registered at or after the week opened are left out entirely.
    /// A member whose computation fails is logged and skipped.
    pub async fn weekly_report_for(
        &self,
        members: &[Member],
        week: &WeekWindow,
        base_unit: u64,
    ) -> WeeklyReportResponse {
        let mut report = WeeklyReportResponse {
            week_start: week.monday(),
            window_start: week.start,
            window_end: week.end,
            base_unit,
            fines: Vec::new(),
            total: 0,
            skipped: 0,
        };

        for member in members.iter().filter(|m| m.registered_before(week.start)) {
            match self.weekly_fine(member, week, base_unit).await {
                Ok(fine) => {
                    report.total = report.total.saturating_add(fine.amount);
                    report.fines.push(fine);
                }
                Err(e) => {
                    report.skipped += 1;
                    warn!(member_id = %member.id, error = %e, "Weekly fine failed, skipping");
                }
            }
        }

        report
    }

    /// Weekly report over every active member
    #[instrument(skip(self))]
    pub async fn weekly_report(&self, date: Option<NaiveDate>) -> ServiceResult<WeeklyReportResponse> {
        let week = self.week_window(date);
        let charged = self.charged_members(&week).await?;
        let base_unit = self.ctx.fine_policy().base_unit(charged.len());
        Ok(self.weekly_report_for(&charged, &week, base_unit).await)
    }

    /// Daily results for every active member
    #[instrument(skip(self))]
    pub async fn daily_report(&self, date: Option<NaiveDate>) -> ServiceResult<DailyReportResponse> {
        let day = self.day_window(date);
        let members = self.ctx.member_repo().find_active().await?;

        let mut report = DailyReportResponse {
            date: day.date,
            results: Vec::with_capacity(members.len()),
            passed: 0,
            failed: 0,
            undetermined: 0,
            skipped: 0,
        };

        for member in &members {
            match self.daily_result(member, &day).await {
                Ok(result) => {
                    match result.status {
                        DayStatus::Pass => report.passed += 1,
                        DayStatus::Fail => report.failed += 1,
                        DayStatus::Undetermined => report.undetermined += 1,
                    }
                    report.results.push(result);
                }
                Err(e) => {
                    report.skipped += 1;
                    warn!(member_id = %member.id, error = %e, "Daily result failed, skipping");
                }
            }
        }

        Ok(report)
    }

    /// Active members registered strictly before the week opened
    async fn charged_members(&self, week: &WeekWindow) -> ServiceResult<Vec<Member>> {
        let members = self.ctx.member_repo().find_active().await?;
        Ok(members
            .into_iter()
            .filter(|m| m.registered_before(week.start))
            .collect())
    }

    async fn find_member(&self, member_id: MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", member_id.to_string()))
    }
}
