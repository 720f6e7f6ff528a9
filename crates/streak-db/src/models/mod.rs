//! Database models - SQLx-compatible structs for PostgreSQL tables

mod attendance;
mod member;
mod problem;

pub use attendance::AttendanceModel;
pub use member::MemberModel;
pub use problem::ProblemModel;
