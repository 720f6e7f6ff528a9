//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Inserts reject uniqueness violations with a
//! duplicate `DomainError`; callers decide whether that is benign.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{AttendanceRecord, Member, NewMember, Problem};
use crate::error::DomainError;
use crate::value_objects::{MemberId, ProblemId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;

    /// Find member by chat-platform account id
    async fn find_by_account(&self, account_id: &str) -> RepoResult<Option<Member>>;

    /// Check if an account is already registered
    async fn account_exists(&self, account_id: &str) -> RepoResult<bool>;

    /// Check if a judge handle is already registered
    async fn handle_exists(&self, handle: &str) -> RepoResult<bool>;

    /// Create a new member, assigning its id
    async fn create(&self, member: &NewMember) -> RepoResult<Member>;

    /// Update profile fields, notice hour, and expiration flag
    async fn update(&self, member: &Member) -> RepoResult<()>;

    /// List members that are not expired, ordered by id
    async fn find_active(&self) -> RepoResult<Vec<Member>>;
}

// ============================================================================
// Problem Repository
// ============================================================================

#[async_trait]
pub trait ProblemRepository: Send + Sync {
    /// Check if a problem is catalogued
    async fn exists(&self, id: ProblemId) -> RepoResult<bool>;

    /// Find problem by ID
    async fn find_by_id(&self, id: ProblemId) -> RepoResult<Option<Problem>>;

    /// Catalogue a new problem
    async fn create(&self, problem: &Problem) -> RepoResult<()>;
}

// ============================================================================
// Attendance Repository
// ============================================================================

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Number of records held by a member
    async fn count_by_member(&self, member_id: MemberId) -> RepoResult<u64>;

    /// Problem ids already recorded for a member
    async fn problem_ids_by_member(&self, member_id: MemberId) -> RepoResult<Vec<ProblemId>>;

    /// Check if a (member, problem) record exists
    async fn exists(&self, member_id: MemberId, problem_id: ProblemId) -> RepoResult<bool>;

    /// Insert a record
    async fn create(&self, record: &AttendanceRecord) -> RepoResult<()>;

    /// Records of a member whose creation instant lies in `[start, end]`
    async fn find_in_range(
        &self,
        member_id: MemberId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<Vec<AttendanceRecord>>;

    /// All records currently marked as not qualifying
    async fn find_unqualified(&self) -> RepoResult<Vec<AttendanceRecord>>;

    /// Flip a record to qualifying
    async fn mark_qualified(&self, member_id: MemberId, problem_id: ProblemId) -> RepoResult<()>;
}
