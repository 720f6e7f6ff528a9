//! # streak-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx, plus an
//! in-memory implementation of the same traits.
//!
//! ## Overview
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use streak_common::AppConfig;
//! use streak_db::Repositories;
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let repos = Repositories::connect(&config.database).await?;
//!     let active = repos.members.find_active().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;
mod store;

// Re-export commonly used types
pub use memory::{MemoryAttendanceRepository, MemoryMemberRepository, MemoryProblemRepository};
pub use pool::{create_pool, migrator, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgAttendanceRepository, PgMemberRepository, PgProblemRepository};
pub use store::Repositories;
