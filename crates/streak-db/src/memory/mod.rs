//! In-process repositories
//!
//! Same contracts as the PostgreSQL repositories, including uniqueness rejection,
//! held in memory for tests and single-process development runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;

use streak_core::entities::{AttendanceRecord, Member, NewMember, Problem};
use streak_core::error::DomainError;
use streak_core::traits::{AttendanceRepository, MemberRepository, ProblemRepository, RepoResult};
use streak_core::value_objects::{MemberId, ProblemId};

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Default)]
struct MemberTable {
    last_id: i64,
    rows: BTreeMap<MemberId, Member>,
}

/// In-memory MemberRepository
///
/// One lock guards the whole table so both unique keys are checked atomically.
#[derive(Debug, Clone, Default)]
pub struct MemoryMemberRepository {
    table: Arc<RwLock<MemberTable>>,
}

impl MemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        Ok(self.table.read().rows.get(&id).cloned())
    }

    async fn find_by_account(&self, account_id: &str) -> RepoResult<Option<Member>> {
        let table = self.table.read();
        Ok(table.rows.values().find(|m| m.account_id == account_id).cloned())
    }

    async fn account_exists(&self, account_id: &str) -> RepoResult<bool> {
        Ok(self.table.read().rows.values().any(|m| m.account_id == account_id))
    }

    async fn handle_exists(&self, handle: &str) -> RepoResult<bool> {
        Ok(self.table.read().rows.values().any(|m| m.handle == handle))
    }

    #[instrument(skip(self, member), fields(handle = %member.handle))]
    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        let mut table = self.table.write();
        if table.rows.values().any(|m| m.account_id == member.account_id) {
            return Err(DomainError::AccountAlreadyRegistered);
        }
        if table.rows.values().any(|m| m.handle == member.handle) {
            return Err(DomainError::HandleAlreadyRegistered(member.handle.clone()));
        }

        table.last_id += 1;
        let created = member.clone().into_member(MemberId::new(table.last_id));
        table.rows.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut table = self.table.write();
        let row = table
            .rows
            .get_mut(&member.id)
            .ok_or(DomainError::MemberNotFound(member.id))?;

        // Identity columns are immutable
        row.tier = member.tier;
        row.rating = member.rating;
        row.solved_count = member.solved_count;
        row.bio.clone_from(&member.bio);
        row.profile_image_url.clone_from(&member.profile_image_url);
        row.notice_hour = member.notice_hour;
        row.expired = member.expired;
        Ok(())
    }

    async fn find_active(&self) -> RepoResult<Vec<Member>> {
        let table = self.table.read();
        Ok(table.rows.values().filter(|m| m.is_active()).cloned().collect())
    }
}

// ============================================================================
// Problems
// ============================================================================

/// In-memory ProblemRepository
#[derive(Debug, Clone, Default)]
pub struct MemoryProblemRepository {
    problems: Arc<DashMap<ProblemId, Problem>>,
}

impl MemoryProblemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of catalogued problems
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[async_trait]
impl ProblemRepository for MemoryProblemRepository {
    async fn exists(&self, id: ProblemId) -> RepoResult<bool> {
        Ok(self.problems.contains_key(&id))
    }

    async fn find_by_id(&self, id: ProblemId) -> RepoResult<Option<Problem>> {
        Ok(self.problems.get(&id).map(|p| p.value().clone()))
    }

    async fn create(&self, problem: &Problem) -> RepoResult<()> {
        match self.problems.entry(problem.id) {
            Entry::Occupied(_) => Err(DomainError::ProblemExists(problem.id)),
            Entry::Vacant(slot) => {
                slot.insert(problem.clone());
                Ok(())
            }
        }
    }
}

// ============================================================================
// Attendance
// ============================================================================

/// In-memory AttendanceRepository keyed by (member, problem)
#[derive(Debug, Clone, Default)]
pub struct MemoryAttendanceRepository {
    records: Arc<DashMap<(MemberId, ProblemId), AttendanceRecord>>,
}

impl MemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted<F>(&self, mut keep: F) -> Vec<AttendanceRecord>
    where
        F: FnMut(&AttendanceRecord) -> bool,
    {
        let mut out: Vec<AttendanceRecord> = self
            .records
            .iter()
            .filter(|entry| keep(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by_key(|r| (r.member_id, r.recorded_at, r.problem_id));
        out
    }
}

#[async_trait]
impl AttendanceRepository for MemoryAttendanceRepository {
    async fn count_by_member(&self, member_id: MemberId) -> RepoResult<u64> {
        let count = self.records.iter().filter(|e| e.key().0 == member_id).count();
        Ok(count as u64)
    }

    async fn problem_ids_by_member(&self, member_id: MemberId) -> RepoResult<Vec<ProblemId>> {
        let mut ids: Vec<ProblemId> = self
            .records
            .iter()
            .filter(|e| e.key().0 == member_id)
            .map(|e| e.key().1)
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn exists(&self, member_id: MemberId, problem_id: ProblemId) -> RepoResult<bool> {
        Ok(self.records.contains_key(&(member_id, problem_id)))
    }

    async fn create(&self, record: &AttendanceRecord) -> RepoResult<()> {
        match self.records.entry((record.member_id, record.problem_id)) {
            Entry::Occupied(_) => Err(DomainError::AttendanceExists {
                member_id: record.member_id,
                problem_id: record.problem_id,
            }),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(())
            }
        }
    }

    async fn find_in_range(
        &self,
        member_id: MemberId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        Ok(self.collect_sorted(|r| {
            r.member_id == member_id && start <= r.recorded_at && r.recorded_at <= end
        }))
    }

    async fn find_unqualified(&self) -> RepoResult<Vec<AttendanceRecord>> {
        Ok(self.collect_sorted(|r| !r.qualifies))
    }

    async fn mark_qualified(&self, member_id: MemberId, problem_id: ProblemId) -> RepoResult<()> {
        if let Some(mut record) = self.records.get_mut(&(member_id, problem_id)) {
            record.qualifies = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use streak_core::value_objects::{Level, Tier};

    fn new_member(account: &str, handle: &str) -> NewMember {
        NewMember {
            account_id: account.to_string(),
            handle: handle.to_string(),
            tier: Tier::new(11).unwrap(),
            rating: 1200,
            solved_count: 10,
            bio: String::new(),
            profile_image_url: streak_core::entities::DEFAULT_PROFILE_IMAGE.to_string(),
            registered_at: Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(),
        }
    }

    fn record(member: i64, problem: i64, qualifies: bool, at: DateTime<Utc>) -> AttendanceRecord {
        AttendanceRecord {
            member_id: MemberId::new(member),
            problem_id: ProblemId::new(problem),
            qualifies,
            recorded_at: at,
        }
    }

    #[tokio::test]
    async fn test_member_create_assigns_ids() {
        let repo = MemoryMemberRepository::new();
        let a = repo.create(&new_member("1", "alice")).await.unwrap();
        let b = repo.create(&new_member("2", "bob")).await.unwrap();
        assert_eq!(a.id, MemberId::new(1));
        assert_eq!(b.id, MemberId::new(2));
        assert!(repo.account_exists("1").await.unwrap());
        assert!(repo.handle_exists("bob").await.unwrap());
        assert_eq!(repo.find_by_account("2").await.unwrap().unwrap().handle, "bob");
    }

    #[tokio::test]
    async fn test_member_uniqueness() {
        let repo = MemoryMemberRepository::new();
        repo.create(&new_member("1", "alice")).await.unwrap();

        let err = repo.create(&new_member("1", "carol")).await.unwrap_err();
        assert!(matches!(err, DomainError::AccountAlreadyRegistered));

        let err = repo.create(&new_member("3", "alice")).await.unwrap_err();
        assert!(matches!(err, DomainError::HandleAlreadyRegistered(h) if h == "alice"));
    }

    #[tokio::test]
    async fn test_expired_members_leave_active_list() {
        let repo = MemoryMemberRepository::new();
        let mut a = repo.create(&new_member("1", "alice")).await.unwrap();
        repo.create(&new_member("2", "bob")).await.unwrap();

        a.expired = true;
        repo.update(&a).await.unwrap();

        let active = repo.find_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].handle, "bob");
    }

    #[tokio::test]
    async fn test_update_unknown_member() {
        let repo = MemoryMemberRepository::new();
        let ghost = new_member("9", "ghost").into_member(MemberId::new(99));
        assert!(repo.update(&ghost).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_problem_insert_is_unique() {
        let repo = MemoryProblemRepository::new();
        let problem = Problem::new(ProblemId::new(1000), "A+B", Level::new(1).unwrap());
        repo.create(&problem).await.unwrap();
        assert!(repo.create(&problem).await.unwrap_err().is_duplicate());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_attendance_range_is_inclusive() {
        let repo = MemoryAttendanceRepository::new();
        let start = Utc.with_ymd_and_hms(2024, 1, 14, 21, 0, 0).unwrap();
        let end = start + Duration::days(1) - Duration::milliseconds(1);

        repo.create(&record(1, 10, true, start)).await.unwrap();
        repo.create(&record(1, 11, false, end)).await.unwrap();
        repo.create(&record(1, 12, true, end + Duration::milliseconds(1))).await.unwrap();
        repo.create(&record(2, 10, true, start)).await.unwrap();

        let found = repo.find_in_range(MemberId::new(1), start, end).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|r| r.problem_id.into_inner()).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(repo.count_by_member(MemberId::new(1)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_attendance_duplicate_and_requalify() {
        let repo = MemoryAttendanceRepository::new();
        let at = Utc::now();
        repo.create(&record(1, 10, false, at)).await.unwrap();

        let err = repo.create(&record(1, 10, true, at)).await.unwrap_err();
        assert!(matches!(err, DomainError::AttendanceExists { .. }));

        assert_eq!(repo.find_unqualified().await.unwrap().len(), 1);
        repo.mark_qualified(MemberId::new(1), ProblemId::new(10)).await.unwrap();
        assert!(repo.find_unqualified().await.unwrap().is_empty());
    }
}
