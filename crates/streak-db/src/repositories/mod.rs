//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in streak-core.
//! Each repository handles database operations for a specific domain entity.

mod attendance;
mod error;
mod member;
mod problem;

pub use attendance::PgAttendanceRepository;
pub use member::PgMemberRepository;
pub use problem::PgProblemRepository;
