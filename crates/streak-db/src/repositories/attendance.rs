//! PostgreSQL implementation of AttendanceRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use streak_core::entities::AttendanceRecord;
use streak_core::error::DomainError;
use streak_core::traits::{AttendanceRepository, RepoResult};
use streak_core::value_objects::{MemberId, ProblemId};

use crate::models::AttendanceModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of AttendanceRepository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    /// Create a new PgAttendanceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self))]
    async fn count_by_member(&self, member_id: MemberId) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM attendance WHERE member_id = $1
            ",
        )
        .bind(member_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn problem_ids_by_member(&self, member_id: MemberId) -> RepoResult<Vec<ProblemId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT problem_id FROM attendance WHERE member_id = $1 ORDER BY problem_id
            ",
        )
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(ProblemId::new).collect())
    }

    #[instrument(skip(self))]
    async fn exists(&self, member_id: MemberId, problem_id: ProblemId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM attendance WHERE member_id = $1 AND problem_id = $2)
            ",
        )
        .bind(member_id.into_inner())
        .bind(problem_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, record), fields(member_id = %record.member_id, problem_id = %record.problem_id))]
    async fn create(&self, record: &AttendanceRecord) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO attendance (member_id, problem_id, qualifies, recorded_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(record.member_id.into_inner())
        .bind(record.problem_id.into_inner())
        .bind(record.qualifies)
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |_| DomainError::AttendanceExists {
                member_id: record.member_id,
                problem_id: record.problem_id,
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_in_range(
        &self,
        member_id: MemberId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        let results = sqlx::query_as::<_, AttendanceModel>(
            r"
            SELECT member_id, problem_id, qualifies, recorded_at
            FROM attendance
            WHERE member_id = $1 AND recorded_at BETWEEN $2 AND $3
            ORDER BY recorded_at, problem_id
            ",
        )
        .bind(member_id.into_inner())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AttendanceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_unqualified(&self) -> RepoResult<Vec<AttendanceRecord>> {
        let results = sqlx::query_as::<_, AttendanceModel>(
            r"
            SELECT member_id, problem_id, qualifies, recorded_at
            FROM attendance
            WHERE NOT qualifies
            ORDER BY member_id, problem_id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(AttendanceRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn mark_qualified(&self, member_id: MemberId, problem_id: ProblemId) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE attendance SET qualifies = TRUE
            WHERE member_id = $1 AND problem_id = $2
            ",
        )
        .bind(member_id.into_inner())
        .bind(problem_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
