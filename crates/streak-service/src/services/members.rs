//! Member service
//!
//! Registration, lookup, profile refresh, reminder settings, and expiry.

use tracing::{info, instrument, warn};
use validator::Validate;

use streak_core::entities::{Member, NewMember};
use streak_core::{DomainError, MemberId};

use crate::dto::{
    MemberResponse, NoticeHourRequest, ProfileRefreshReport, RegisterRequest, RegistrationResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::sync::{ProblemSyncEngine, SyncMode};
use super::tasks::TaskKind;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a member and start the backdated first sync
    ///
    /// The sync runs as a background task; its id is returned alongside the member.
    #[instrument(skip(self, request), fields(account_id = %request.account_id, handle = %request.handle))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegistrationResponse> {
        request.validate()?;

        let members = self.ctx.member_repo();
        if members.account_exists(&request.account_id).await? {
            return Err(DomainError::AccountAlreadyRegistered.into());
        }
        if members.handle_exists(&request.handle).await? {
            return Err(DomainError::HandleAlreadyRegistered(request.handle).into());
        }

        let profile = self.ctx.judge().fetch_profile(&request.handle).await?;
        let new_member =
            NewMember::from_profile(request.account_id, request.handle, &profile, self.ctx.now());
        let member = members.create(&new_member).await?;

        info!(member_id = %member.id, tier = %member.tier, "Member registered");

        let ctx = self.ctx.clone();
        let target = member.clone();
        let task_id = self.ctx.tasks().spawn(TaskKind::InitialSync, async move {
            let outcome = ProblemSyncEngine::new(&ctx)
                .sync_member(&target, SyncMode::Initial)
                .await?;
            serde_json::to_value(outcome).map_err(|e| ServiceError::internal(e.to_string()))
        });

        Ok(RegistrationResponse {
            member: MemberResponse::from(&member),
            task_id,
        })
    }

    /// Get a member by id
    #[instrument(skip(self))]
    pub async fn get_member(&self, member_id: MemberId) -> ServiceResult<MemberResponse> {
        Ok(MemberResponse::from(self.find(member_id).await?))
    }

    /// Get a member by chat-platform account id
    #[instrument(skip(self))]
    pub async fn get_member_by_account(&self, account_id: &str) -> ServiceResult<MemberResponse> {
        let member = self
            .ctx
            .member_repo()
            .find_by_account(account_id)
            .await?
            .ok_or_else(|| DomainError::AccountNotFound(account_id.to_string()))?;

        Ok(MemberResponse::from(member))
    }

    /// List members taking part in batch processing
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<Vec<MemberResponse>> {
        let members = self.ctx.member_repo().find_active().await?;
        Ok(members.iter().map(MemberResponse::from).collect())
    }

    /// Flag a member as expired; history is kept
    #[instrument(skip(self))]
    pub async fn expire_member(&self, member_id: MemberId) -> ServiceResult<MemberResponse> {
        let mut member = self.find(member_id).await?;
        if !member.expired {
            member.expired = true;
            self.ctx.member_repo().update(&member).await?;
            info!(member_id = %member.id, "Member expired");
        }

        Ok(MemberResponse::from(member))
    }

    /// Set or clear the local hour at which a member is reminded
    #[instrument(skip(self))]
    pub async fn set_notice_hour(
        &self,
        member_id: MemberId,
        request: NoticeHourRequest,
    ) -> ServiceResult<MemberResponse> {
        request.validate()?;

        let mut member = self.find(member_id).await?;
        member.set_notice_hour(request.hour)?;
        self.ctx.member_repo().update(&member).await?;

        Ok(MemberResponse::from(member))
    }

    /// Overwrite a member's judge-sourced profile fields
    #[instrument(skip(self))]
    pub async fn refresh_profile(&self, member_id: MemberId) -> ServiceResult<MemberResponse> {
        let mut member = self.find(member_id).await?;
        self.refresh(&mut member).await?;
        Ok(MemberResponse::from(member))
    }

    /// Refresh every active member in turn
    ///
    /// A failing member is logged and skipped.
    #[instrument(skip(self))]
    pub async fn refresh_all_profiles(&self) -> ServiceResult<ProfileRefreshReport> {
        let members = self.ctx.member_repo().find_active().await?;
        let mut report = ProfileRefreshReport {
            members: members.len(),
            ..ProfileRefreshReport::default()
        };

        for mut member in members {
            match self.refresh(&mut member).await {
                Ok(()) => report.refreshed += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(member_id = %member.id, error = %e, "Profile refresh failed, continuing");
                }
            }
        }

        info!(refreshed = report.refreshed, failed = report.failed, "Profiles refreshed");
        Ok(report)
    }

    pub(crate) async fn refresh(&self, member: &mut Member) -> ServiceResult<()> {
        let profile = self.ctx.judge().fetch_profile(&member.handle).await?;
        member.apply_profile(&profile);
        self.ctx.member_repo().update(member).await?;
        Ok(())
    }

    pub(crate) async fn find(&self, member_id: MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Member", member_id.to_string()))
    }
}
