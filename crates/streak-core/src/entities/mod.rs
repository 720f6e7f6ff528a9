//! Domain entities - core business objects

mod attendance;
mod member;
mod problem;

pub use attendance::{qualified_count, AttendanceRecord};
pub use member::{validate_notice_hour, Member, NewMember, DEFAULT_PROFILE_IMAGE};
pub use problem::Problem;
