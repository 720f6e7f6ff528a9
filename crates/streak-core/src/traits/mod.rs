//! Ports - storage, judge service, and clock

mod clock;
mod judge;
mod repositories;

pub use clock::{Clock, ManualClock, SystemClock};
pub use judge::{JudgeClient, JudgeProfile, SolvedPage, SolvedProblem, SOLVED_PAGE_SIZE};
pub use repositories::{AttendanceRepository, MemberRepository, ProblemRepository, RepoResult};
