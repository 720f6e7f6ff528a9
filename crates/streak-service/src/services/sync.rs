//! Problem sync engine
//!
//! Pulls a member's solved-problem list from the judge and records every solve
//! not yet held locally. The judge's total is compared against the local record
//! count first, so an unchanged history costs a single page request.

use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

use streak_core::entities::{AttendanceRecord, Member, Problem};
use streak_core::traits::SolvedProblem;
use streak_core::MemberId;

use crate::dto::{BatchSyncReport, SyncResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// How new records are timestamped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Recorded now; counts toward the current day
    #[default]
    Normal,
    /// Bulk historical import, backdated so it lands outside any judged day
    Initial,
}

/// Problem sync engine
pub struct ProblemSyncEngine<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProblemSyncEngine<'a> {
    /// Create a new ProblemSyncEngine
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Sync one member by id
    #[instrument(skip(self))]
    pub async fn sync(&self, member_id: MemberId, mode: SyncMode) -> ServiceResult<SyncResponse> {
        let member = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", member_id.to_string()))?;

        self.sync_member(&member, mode).await
    }

    /// Sync one member
    ///
    /// Every page is fetched before anything is written, so a judge failure
    /// leaves the store untouched. Once writing starts, rows already inserted
    /// stay even if a later insert fails; re-running is safe.
    #[instrument(skip(self, member), fields(member_id = %member.id, handle = %member.handle))]
    pub async fn sync_member(&self, member: &Member, mode: SyncMode) -> ServiceResult<SyncResponse> {
        let judge = self.ctx.judge();
        let attendance = self.ctx.attendance_repo();

        let first = judge.fetch_solved_page(&member.handle, 1).await?;
        let held = attendance.count_by_member(member.id).await?;
        if held == first.count {
            debug!(count = held, "Solved count unchanged");
            return Ok(SyncResponse::default());
        }

        let pages = first.page_count();
        let mut items = first.items;
        for page in 2..=pages {
            let next = judge.fetch_solved_page(&member.handle, page).await?;
            items.extend(next.items);
        }

        let mut known: HashSet<_> = attendance
            .problem_ids_by_member(member.id)
            .await?
            .into_iter()
            .collect();

        let recorded_at = match mode {
            SyncMode::Normal => self.ctx.now(),
            SyncMode::Initial => self.ctx.now() - self.ctx.backfill(),
        };

        let mut outcome = SyncResponse::default();
        for item in &items {
            if self.catalogue(item).await? {
                outcome.new_problems += 1;
            }

            if !known.insert(item.problem_id) {
                continue;
            }

            let record = AttendanceRecord::evaluate(
                member,
                item.problem_id,
                item.level,
                self.ctx.policy(),
                recorded_at,
            );
            match attendance.create(&record).await {
                Ok(()) => outcome.new_records += 1,
                // A concurrent sync of the same member got there first
                Err(e) if e.is_duplicate() => {
                    debug!(problem_id = %item.problem_id, "Record already present");
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            remote = first.count,
            held,
            new_problems = outcome.new_problems,
            new_records = outcome.new_records,
            ?mode,
            "Member synced"
        );

        Ok(outcome)
    }

    /// Sync every active member in turn
    ///
    /// A failing member is logged and skipped.
    #[instrument(skip(self))]
    pub async fn sync_all(&self) -> ServiceResult<BatchSyncReport> {
        let members = self.ctx.member_repo().find_active().await?;
        let mut report = BatchSyncReport {
            members: members.len(),
            ..BatchSyncReport::default()
        };

        for member in &members {
            match self.sync_member(member, SyncMode::Normal).await {
                Ok(outcome) => {
                    report.synced += 1;
                    report.new_problems += outcome.new_problems;
                    report.new_records += outcome.new_records;
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(member_id = %member.id, error = %e, "Sync failed, continuing");
                }
            }
        }

        info!(
            members = report.members,
            failed = report.failed,
            new_records = report.new_records,
            "Batch sync finished"
        );

        Ok(report)
    }

    /// Add a problem to the catalog if absent; true when this call added it
    async fn catalogue(&self, item: &SolvedProblem) -> ServiceResult<bool> {
        let problems = self.ctx.problem_repo();
        if problems.exists(item.problem_id).await? {
            return Ok(false);
        }

        let problem = Problem::new(item.problem_id, item.title.clone(), item.level);
        match problems.create(&problem).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_duplicate() => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
