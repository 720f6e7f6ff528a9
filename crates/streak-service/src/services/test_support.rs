//! Shared fixtures for service tests

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use streak_core::traits::{
    AttendanceRepository, Clock, JudgeClient, JudgeProfile, ManualClock, RepoResult, SolvedPage, SolvedProblem,
    SOLVED_PAGE_SIZE,
};
use streak_core::{
    AttendanceCalendar, AttendanceRecord, DomainError, Level, Member, MemberId, NewMember, ProblemId, Tier,
};
use streak_db::Repositories;

use super::context::{ServiceContext, ServiceContextBuilder};

/// In-process judge with scripted profiles and solve lists
#[derive(Default)]
pub struct StubJudge {
    profiles: Mutex<HashMap<String, JudgeProfile>>,
    solved: Mutex<HashMap<String, Vec<SolvedProblem>>>,
    failing: AtomicBool,
    failing_handles: Mutex<HashSet<String>>,
    page_calls: AtomicUsize,
}

impl StubJudge {
    pub fn set_profile(&self, handle: &str, tier: i64) {
        self.profiles.lock().unwrap().insert(
            handle.to_string(),
            JudgeProfile {
                handle: handle.to_string(),
                tier: Tier::new(tier).unwrap(),
                rating: 1000 + i32::try_from(tier).unwrap() * 50,
                bio: format!("{handle} bio"),
                solved_count: 0,
                profile_image_url: None,
            },
        );
    }

    /// Append solved problems `(id, level)` for a handle
    pub fn solve(&self, handle: &str, problems: &[(i64, i64)]) {
        let mut solved = self.solved.lock().unwrap();
        let list = solved.entry(handle.to_string()).or_default();
        for &(id, level) in problems {
            list.push(SolvedProblem {
                problem_id: ProblemId::new(id),
                title: format!("Problem {id}"),
                level: Level::new(level).unwrap(),
            });
        }
        list.sort_by_key(|p| p.problem_id);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make every request for one handle fail
    pub fn fail_handle(&self, handle: &str) {
        self.failing_handles.lock().unwrap().insert(handle.to_string());
    }

    fn fails(&self, handle: &str) -> bool {
        self.failing.load(Ordering::SeqCst) || self.failing_handles.lock().unwrap().contains(handle)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JudgeClient for StubJudge {
    async fn fetch_profile(&self, handle: &str) -> RepoResult<JudgeProfile> {
        if self.fails(handle) {
            return Err(DomainError::UpstreamError("connection refused".into()));
        }
        self.profiles
            .lock()
            .unwrap()
            .get(handle)
            .cloned()
            .ok_or(DomainError::UpstreamStatus { status: 404 })
    }

    async fn fetch_solved_page(&self, handle: &str, page: u32) -> RepoResult<SolvedPage> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        if self.fails(handle) {
            return Err(DomainError::UpstreamError("connection refused".into()));
        }
        let solved = self.solved.lock().unwrap();
        let all = solved.get(handle).cloned().unwrap_or_default();
        let size = SOLVED_PAGE_SIZE as usize;
        let items = all
            .iter()
            .skip((page as usize - 1) * size)
            .take(size)
            .cloned()
            .collect();
        Ok(SolvedPage {
            count: all.len() as u64,
            items,
        })
    }
}

pub struct Fixture {
    pub ctx: ServiceContext,
    pub judge: Arc<StubJudge>,
    pub clock: Arc<ManualClock>,
}

impl Fixture {
    /// Memory-backed context whose clock starts at `start`
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_repositories(start, Repositories::memory())
    }

    pub fn with_repositories(start: DateTime<Utc>, repos: Repositories) -> Self {
        let judge = Arc::new(StubJudge::default());
        let clock = Arc::new(ManualClock::new(start));
        let ctx = ServiceContextBuilder::new()
            .repositories(repos)
            .judge(judge.clone())
            .clock(clock.clone())
            .build()
            .unwrap();
        Self { ctx, judge, clock }
    }

    pub fn clock_now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Store a member directly, bypassing registration
    pub async fn member(&self, handle: &str, tier: i64, registered_at: DateTime<Utc>) -> Member {
        self.judge.set_profile(handle, tier);
        let profile = self.judge.fetch_profile(handle).await.unwrap();
        let new = NewMember::from_profile(format!("acct-{handle}"), handle, &profile, registered_at);
        self.ctx.member_repo().create(&new).await.unwrap()
    }
}

/// Attendance store where another writer inserts one problem's record
/// between the sync's read of known ids and its own insert
pub struct RacingAttendance {
    inner: Arc<dyn AttendanceRepository>,
    contested: ProblemId,
    lost: AtomicUsize,
}

impl RacingAttendance {
    pub fn new(inner: Arc<dyn AttendanceRepository>, contested: ProblemId) -> Self {
        Self {
            inner,
            contested,
            lost: AtomicUsize::new(0),
        }
    }

    /// Inserts that lost to the other writer
    pub fn lost(&self) -> usize {
        self.lost.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttendanceRepository for RacingAttendance {
    async fn count_by_member(&self, member_id: MemberId) -> RepoResult<u64> {
        self.inner.count_by_member(member_id).await
    }

    async fn problem_ids_by_member(&self, member_id: MemberId) -> RepoResult<Vec<ProblemId>> {
        self.inner.problem_ids_by_member(member_id).await
    }

    async fn exists(&self, member_id: MemberId, problem_id: ProblemId) -> RepoResult<bool> {
        self.inner.exists(member_id, problem_id).await
    }

    async fn create(&self, record: &AttendanceRecord) -> RepoResult<()> {
        if record.problem_id == self.contested {
            self.inner.create(record).await?;
            let result = self.inner.create(record).await;
            if result.is_err() {
                self.lost.fetch_add(1, Ordering::SeqCst);
            }
            return result;
        }
        self.inner.create(record).await
    }

    async fn find_in_range(
        &self,
        member_id: MemberId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        self.inner.find_in_range(member_id, start, end).await
    }

    async fn find_unqualified(&self) -> RepoResult<Vec<AttendanceRecord>> {
        self.inner.find_unqualified().await
    }

    async fn mark_qualified(&self, member_id: MemberId, problem_id: ProblemId) -> RepoResult<()> {
        self.inner.mark_qualified(member_id, problem_id).await
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Instant of a local wall-clock time in the default calendar
pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    AttendanceCalendar::default().from_local(date(y, m, d).and_hms_opt(h, min, 0).unwrap())
}

#[test]
fn test_local_helper_matches_offset() {
    assert_eq!(local(2024, 1, 15, 9, 0), Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
}
