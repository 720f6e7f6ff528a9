//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use streak_core::entities::{Member, NewMember};
use streak_core::error::DomainError;
use streak_core::traits::{MemberRepository, RepoResult};
use streak_core::value_objects::MemberId;

use crate::mappers::{MemberInsert, MemberUpdate};
use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation, member_not_found};

const MEMBER_COLUMNS: &str = "id, account_id, handle, tier, rating, solved_count, bio, \
                              profile_image_url, registered_at, notice_hour, expired";

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_account(&self, account_id: &str) -> RepoResult<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE account_id = $1");
        let result = sqlx::query_as::<_, MemberModel>(&sql)
            .bind(account_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn account_exists(&self, account_id: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM members WHERE account_id = $1)
            ",
        )
        .bind(account_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn handle_exists(&self, handle: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM members WHERE handle = $1)
            ",
        )
        .bind(handle)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(handle = %member.handle))]
    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        let insert = MemberInsert::new(member);
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO members (account_id, handle, tier, rating, solved_count, bio,
                                 profile_image_url, registered_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            ",
        )
        .bind(insert.account_id)
        .bind(insert.handle)
        .bind(insert.tier)
        .bind(insert.rating)
        .bind(insert.solved_count)
        .bind(insert.bio)
        .bind(insert.profile_image_url)
        .bind(insert.registered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| match constraint {
                Some("members_account_id_key") => DomainError::AccountAlreadyRegistered,
                _ => DomainError::HandleAlreadyRegistered(member.handle.clone()),
            })
        })?;

        Ok(member.clone().into_member(MemberId::new(id)))
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let update = MemberUpdate::new(member);
        let result = sqlx::query(
            r"
            UPDATE members
            SET tier = $2, rating = $3, solved_count = $4, bio = $5,
                profile_image_url = $6, notice_hour = $7, expired = $8
            WHERE id = $1
            ",
        )
        .bind(update.id)
        .bind(update.tier)
        .bind(update.rating)
        .bind(update.solved_count)
        .bind(update.bio)
        .bind(update.profile_image_url)
        .bind(update.notice_hour)
        .bind(update.expired)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(member.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE NOT expired ORDER BY id");
        let results = sqlx::query_as::<_, MemberModel>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        results.into_iter().map(Member::try_from).collect()
    }
}
