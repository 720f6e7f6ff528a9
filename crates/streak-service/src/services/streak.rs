//! On-demand streak check
//!
//! Brings one member up to date with the judge and reports their day. Each
//! requester may only trigger this once per streak cooldown.

use chrono::NaiveDate;
use tracing::{instrument, warn};

use streak_core::MemberId;

use crate::dto::DailyResultResponse;

use super::context::ServiceContext;
use super::cooldown::{CooldownAction, CooldownKey};
use super::error::{ServiceError, ServiceResult};
use super::fines::FineAccountant;
use super::members::MemberService;
use super::sync::{ProblemSyncEngine, SyncMode};

/// Streak check service
pub struct StreakService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StreakService<'a> {
    /// Create a new StreakService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Refresh and sync a member, then report the day window containing `date`
    ///
    /// Judge failures during the refresh are logged; the report is built from
    /// whatever is stored.
    #[instrument(skip(self))]
    pub async fn check_streak(
        &self,
        requester: &str,
        member_id: MemberId,
        date: Option<NaiveDate>,
    ) -> ServiceResult<DailyResultResponse> {
        // Unknown members are rejected without spending the requester's cooldown
        let members = MemberService::new(self.ctx);
        let mut member = members.find(member_id).await?;

        let key = CooldownKey::scoped(CooldownAction::StreakCheck, requester);
        let interval = self.ctx.streak_cooldown();
        if !self.ctx.cooldowns().try_acquire(key.clone(), interval) {
            let retry_after = self
                .ctx
                .cooldowns()
                .retry_after(&key)
                .unwrap_or_else(|| self.ctx.now() + interval);
            return Err(ServiceError::CoolingDown { retry_after });
        }

        // Refresh first so new records are judged against the current tier
        if let Err(e) = members.refresh(&mut member).await {
            warn!(member_id = %member.id, error = %e, "Profile refresh failed during streak check");
        }
        if let Err(e) = ProblemSyncEngine::new(self.ctx)
            .sync_member(&member, SyncMode::Normal)
            .await
        {
            warn!(member_id = %member.id, error = %e, "Sync failed during streak check");
        }

        let accountant = FineAccountant::new(self.ctx);
        accountant.daily_result(&member, &accountant.day_window(date)).await
    }
}
