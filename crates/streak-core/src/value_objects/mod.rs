//! Value objects - immutable types that represent domain concepts

mod ids;
mod rank;

pub use ids::{IdParseError, MemberId, ProblemId};
pub use rank::{Level, RankError, Tier};
