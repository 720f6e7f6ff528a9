//! PostgreSQL implementation of ProblemRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use streak_core::entities::Problem;
use streak_core::error::DomainError;
use streak_core::traits::{ProblemRepository, RepoResult};
use streak_core::value_objects::ProblemId;

use crate::models::ProblemModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ProblemRepository
#[derive(Clone)]
pub struct PgProblemRepository {
    pool: PgPool,
}

impl PgProblemRepository {
    /// Create a new PgProblemRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProblemRepository for PgProblemRepository {
    #[instrument(skip(self))]
    async fn exists(&self, id: ProblemId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM problems WHERE id = $1)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ProblemId) -> RepoResult<Option<Problem>> {
        let result = sqlx::query_as::<_, ProblemModel>(
            r"
            SELECT id, title, level FROM problems WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Problem::try_from).transpose()
    }

    #[instrument(skip(self, problem), fields(problem_id = %problem.id))]
    async fn create(&self, problem: &Problem) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO problems (id, title, level)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(problem.id.into_inner())
        .bind(&problem.title)
        .bind(i16::from(problem.level.value()))
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::ProblemExists(problem.id)))?;

        Ok(())
    }
}
