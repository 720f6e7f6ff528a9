//! # streak-core
//!
//! Domain layer containing entities, attendance rules, and the ports to storage
//! and the judge service. This crate has zero dependencies on infrastructure
//! (database, HTTP, web framework).

pub mod attendance;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use attendance::{
    fine_amount, parse_date, AttendanceCalendar, DayStatus, DayWindow, FinePolicy,
    QualificationPolicy, WeekWindow,
};
pub use entities::{AttendanceRecord, Member, NewMember, Problem};
pub use error::DomainError;
pub use traits::{
    AttendanceRepository, Clock, JudgeClient, JudgeProfile, ManualClock, MemberRepository,
    ProblemRepository, RepoResult, SolvedPage, SolvedProblem, SystemClock,
};
pub use value_objects::{Level, MemberId, ProblemId, Tier};
