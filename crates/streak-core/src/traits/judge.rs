//! Judge service port - profile lookup and solved-problem search

use async_trait::async_trait;

use crate::traits::RepoResult;
use crate::value_objects::{Level, ProblemId, Tier};

/// Page size of the judge's solved-problem search
pub const SOLVED_PAGE_SIZE: u32 = 50;

/// Profile snapshot reported by the judge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeProfile {
    pub handle: String,
    pub tier: Tier,
    pub rating: i32,
    pub bio: String,
    pub solved_count: i32,
    pub profile_image_url: Option<String>,
}

/// One solved problem in a search page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedProblem {
    pub problem_id: ProblemId,
    pub title: String,
    pub level: Level,
}

/// One page of a member's solved problems, ascending by problem id
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolvedPage {
    /// Total number of solved problems across all pages
    pub count: u64,
    pub items: Vec<SolvedProblem>,
}

impl SolvedPage {
    /// Number of pages needed to list `count` problems
    pub fn page_count(&self) -> u32 {
        self.count.div_ceil(u64::from(SOLVED_PAGE_SIZE)) as u32
    }
}

/// External judge service
///
/// Any non-success response or transport failure is an upstream `DomainError`.
#[async_trait]
pub trait JudgeClient: Send + Sync {
    /// Look up a member's profile by handle
    async fn fetch_profile(&self, handle: &str) -> RepoResult<JudgeProfile>;

    /// Fetch one page (1-based) of a handle's solved problems
    async fn fetch_solved_page(&self, handle: &str, page: u32) -> RepoResult<SolvedPage>;
}
