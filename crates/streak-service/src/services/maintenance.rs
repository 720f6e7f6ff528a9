//! Maintenance service
//!
//! Fleet-wide refresh, background task lookup, and the offline requalification
//! pass over stored records.

use std::collections::HashMap;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use streak_core::entities::{Member, Problem};
use streak_core::{MemberId, ProblemId};

use crate::dto::{FleetRefreshSummary, RequalifyResponse, TaskAcceptedResponse, TaskResponse};

use super::context::ServiceContext;
use super::cooldown::{CooldownAction, CooldownKey};
use super::error::{ServiceError, ServiceResult};
use super::members::MemberService;
use super::sync::ProblemSyncEngine;
use super::tasks::TaskKind;

/// Maintenance service
pub struct MaintenanceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MaintenanceService<'a> {
    /// Create a new MaintenanceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sync every active member, then refresh every profile
    #[instrument(skip(self))]
    pub async fn run_fleet_refresh(&self) -> ServiceResult<FleetRefreshSummary> {
        let sync = ProblemSyncEngine::new(self.ctx).sync_all().await?;
        let profiles = MemberService::new(self.ctx).refresh_all_profiles().await?;
        Ok(FleetRefreshSummary { sync, profiles })
    }

    /// Start a fleet refresh in the background, at most once per refresh cooldown
    #[instrument(skip(self))]
    pub fn force_refresh(&self) -> ServiceResult<TaskAcceptedResponse> {
        let key = CooldownKey::global(CooldownAction::Refresh);
        let interval = self.ctx.refresh_cooldown();
        if !self.ctx.cooldowns().try_acquire(key.clone(), interval) {
            let retry_after = self
                .ctx
                .cooldowns()
                .retry_after(&key)
                .unwrap_or_else(|| self.ctx.now() + interval);
            info!(%retry_after, "Forced refresh refused");
            return Err(ServiceError::CoolingDown { retry_after });
        }

        let ctx = self.ctx.clone();
        let task_id = self.ctx.tasks().spawn(TaskKind::FleetRefresh, async move {
            let summary = MaintenanceService::new(&ctx).run_fleet_refresh().await?;
            serde_json::to_value(summary).map_err(|e| ServiceError::internal(e.to_string()))
        });

        Ok(TaskAcceptedResponse {
            task_id,
            kind: TaskKind::FleetRefresh,
        })
    }

    /// Snapshot of a background task
    pub fn task(&self, id: Uuid) -> ServiceResult<TaskResponse> {
        self.ctx
            .tasks()
            .get(id)
            .map(TaskResponse::from)
            .ok_or_else(|| ServiceError::not_found("Task", id.to_string()))
    }

    /// Re-evaluate every non-qualifying record against current tiers
    ///
    /// Records are only ever upgraded. Records whose member or problem is
    /// missing are skipped.
    #[instrument(skip(self))]
    pub async fn requalify_all(&self) -> ServiceResult<RequalifyResponse> {
        let records = self.ctx.attendance_repo().find_unqualified().await?;
        let mut members: HashMap<MemberId, Option<Member>> = HashMap::new();
        let mut problems: HashMap<ProblemId, Option<Problem>> = HashMap::new();
        let mut response = RequalifyResponse {
            examined: records.len(),
            upgraded: 0,
        };

        for record in records {
            let member = match members.get(&record.member_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.ctx.member_repo().find_by_id(record.member_id).await?;
                    members.insert(record.member_id, found.clone());
                    found
                }
            };
            let problem = match problems.get(&record.problem_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.ctx.problem_repo().find_by_id(record.problem_id).await?;
                    problems.insert(record.problem_id, found.clone());
                    found
                }
            };

            let (Some(member), Some(problem)) = (member, problem) else {
                warn!(
                    member_id = %record.member_id,
                    problem_id = %record.problem_id,
                    "Orphaned record, skipping"
                );
                continue;
            };

            if self.ctx.policy().qualifies(member.tier, problem.level) {
                self.ctx
                    .attendance_repo()
                    .mark_qualified(record.member_id, record.problem_id)
                    .await?;
                response.upgraded += 1;
            }
        }

        info!(examined = response.examined, upgraded = response.upgraded, "Requalification finished");
        Ok(response)
    }
}
