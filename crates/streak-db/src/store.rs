//! Repository bundle selected by configuration

use std::sync::Arc;

use streak_common::DatabaseConfig;
use streak_core::error::DomainError;
use streak_core::traits::{AttendanceRepository, MemberRepository, ProblemRepository};

use crate::memory::{MemoryAttendanceRepository, MemoryMemberRepository, MemoryProblemRepository};
use crate::pool::{create_pool, run_migrations, PgPool, PoolConfig};
use crate::repositories::{PgAttendanceRepository, PgMemberRepository, PgProblemRepository};

/// The three repositories the engine needs, behind their traits
#[derive(Clone)]
pub struct Repositories {
    pub members: Arc<dyn MemberRepository>,
    pub problems: Arc<dyn ProblemRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            members: Arc::new(PgMemberRepository::new(pool.clone())),
            problems: Arc::new(PgProblemRepository::new(pool.clone())),
            attendance: Arc::new(PgAttendanceRepository::new(pool)),
        }
    }

    /// Fresh, empty in-memory repositories
    pub fn memory() -> Self {
        Self {
            members: Arc::new(MemoryMemberRepository::new()),
            problems: Arc::new(MemoryProblemRepository::new()),
            attendance: Arc::new(MemoryAttendanceRepository::new()),
        }
    }

    /// Connect according to `DATABASE_URL`, migrating PostgreSQL on the way
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        if config.is_memory() {
            tracing::warn!("Using in-memory store; data is lost on exit");
            return Ok(Self::memory());
        }

        let pool = create_pool(&PoolConfig::from(config))
            .await
            .map_err(|e| DomainError::DatabaseError(format!("connect: {e}")))?;
        run_migrations(&pool)
            .await
            .map_err(|e| DomainError::DatabaseError(format!("migrate: {e}")))?;

        tracing::info!("Connected to PostgreSQL");
        Ok(Self::postgres(pool))
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
