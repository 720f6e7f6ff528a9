//! Service context - dependency container for services
//!
//! Holds the repositories, the judge client, the clock, attendance settings, and
//! the process-wide cooldown gate and task registry.

use chrono::Duration;
use std::sync::Arc;

use streak_common::{AppConfig, AppError};
use streak_core::traits::{
    AttendanceRepository, Clock, JudgeClient, MemberRepository, ProblemRepository, SystemClock,
};
use streak_core::{AttendanceCalendar, FinePolicy, QualificationPolicy};
use streak_db::Repositories;

use super::cooldown::CooldownGate;
use super::error::{ServiceError, ServiceResult};
use super::tasks::TaskTracker;

const DEFAULT_BACKFILL_DAYS: i64 = 3;
const DEFAULT_REFRESH_COOLDOWN_SECS: i64 = 3600;
const DEFAULT_STREAK_COOLDOWN_SECS: i64 = 300;

/// Service context containing all dependencies
///
/// Cheap to clone; background tasks take their own copy.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    problem_repo: Arc<dyn ProblemRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,

    // Collaborators
    judge: Arc<dyn JudgeClient>,
    clock: Arc<dyn Clock>,

    // Attendance rules
    calendar: AttendanceCalendar,
    policy: QualificationPolicy,
    fine_policy: FinePolicy,
    backfill: Duration,

    // Rate limits
    refresh_cooldown: Duration,
    streak_cooldown: Duration,
    cooldowns: Arc<CooldownGate>,

    tasks: Arc<TaskTracker>,
}

impl ServiceContext {
    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the problem repository
    pub fn problem_repo(&self) -> &dyn ProblemRepository {
        self.problem_repo.as_ref()
    }

    /// Get the attendance repository
    pub fn attendance_repo(&self) -> &dyn AttendanceRepository {
        self.attendance_repo.as_ref()
    }

    // === Collaborators ===

    /// Get the judge client
    pub fn judge(&self) -> &dyn JudgeClient {
        self.judge.as_ref()
    }

    /// Current instant according to the injected clock
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    // === Attendance rules ===

    pub fn calendar(&self) -> &AttendanceCalendar {
        &self.calendar
    }

    pub fn policy(&self) -> &QualificationPolicy {
        &self.policy
    }

    pub fn fine_policy(&self) -> FinePolicy {
        self.fine_policy
    }

    /// How far initial-sync records are backdated
    pub fn backfill(&self) -> Duration {
        self.backfill
    }

    // === Rate limits and tasks ===

    pub fn refresh_cooldown(&self) -> Duration {
        self.refresh_cooldown
    }

    pub fn streak_cooldown(&self) -> Duration {
        self.streak_cooldown
    }

    pub fn cooldowns(&self) -> &CooldownGate {
        self.cooldowns.as_ref()
    }

    pub fn tasks(&self) -> &TaskTracker {
        self.tasks.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("calendar", &self.calendar)
            .field("fine_policy", &self.fine_policy)
            .field("backfill", &self.backfill)
            .field("cooldowns", &self.cooldowns)
            .field("tasks", &self.tasks)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    problem_repo: Option<Arc<dyn ProblemRepository>>,
    attendance_repo: Option<Arc<dyn AttendanceRepository>>,
    judge: Option<Arc<dyn JudgeClient>>,
    clock: Option<Arc<dyn Clock>>,
    calendar: AttendanceCalendar,
    policy: QualificationPolicy,
    fine_policy: FinePolicy,
    backfill: Duration,
    refresh_cooldown: Duration,
    streak_cooldown: Duration,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            member_repo: None,
            problem_repo: None,
            attendance_repo: None,
            judge: None,
            clock: None,
            calendar: AttendanceCalendar::default(),
            policy: QualificationPolicy::standard(),
            fine_policy: FinePolicy::default(),
            backfill: Duration::days(DEFAULT_BACKFILL_DAYS),
            refresh_cooldown: Duration::seconds(DEFAULT_REFRESH_COOLDOWN_SECS),
            streak_cooldown: Duration::seconds(DEFAULT_STREAK_COOLDOWN_SECS),
        }
    }

    /// Apply the attendance, fine, and cooldown sections of the configuration
    ///
    /// # Errors
    /// Returns `ServiceError::App` if the configured UTC offset is invalid
    pub fn config(mut self, config: &AppConfig) -> ServiceResult<Self> {
        self.calendar = config
            .attendance
            .calendar()
            .map_err(|e| ServiceError::App(AppError::Config(e.to_string())))?;
        self.backfill = config.attendance.backfill();
        self.fine_policy = config.fine.policy;
        self.refresh_cooldown = config.cooldown.refresh_interval();
        self.streak_cooldown = config.cooldown.streak_interval();
        Ok(self)
    }

    /// Use all three repositories of a bundle
    pub fn repositories(mut self, repos: Repositories) -> Self {
        self.member_repo = Some(repos.members);
        self.problem_repo = Some(repos.problems);
        self.attendance_repo = Some(repos.attendance);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn problem_repo(mut self, repo: Arc<dyn ProblemRepository>) -> Self {
        self.problem_repo = Some(repo);
        self
    }

    pub fn attendance_repo(mut self, repo: Arc<dyn AttendanceRepository>) -> Self {
        self.attendance_repo = Some(repo);
        self
    }

    pub fn judge(mut self, judge: Arc<dyn JudgeClient>) -> Self {
        self.judge = Some(judge);
        self
    }

    /// Defaults to the system clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn calendar(mut self, calendar: AttendanceCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn policy(mut self, policy: QualificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn fine_policy(mut self, policy: FinePolicy) -> Self {
        self.fine_policy = policy;
        self
    }

    pub fn backfill(mut self, backfill: Duration) -> Self {
        self.backfill = backfill;
        self
    }

    pub fn refresh_cooldown(mut self, interval: Duration) -> Self {
        self.refresh_cooldown = interval;
        self
    }

    pub fn streak_cooldown(mut self, interval: Duration) -> Self {
        self.streak_cooldown = interval;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        Ok(ServiceContext {
            member_repo: self
                .member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            problem_repo: self
                .problem_repo
                .ok_or_else(|| ServiceError::validation("problem_repo is required"))?,
            attendance_repo: self
                .attendance_repo
                .ok_or_else(|| ServiceError::validation("attendance_repo is required"))?,
            judge: self
                .judge
                .ok_or_else(|| ServiceError::validation("judge is required"))?,
            cooldowns: Arc::new(CooldownGate::new(Arc::clone(&clock))),
            tasks: Arc::new(TaskTracker::new(Arc::clone(&clock))),
            clock,
            calendar: self.calendar,
            policy: self.policy,
            fine_policy: self.fine_policy,
            backfill: self.backfill,
            refresh_cooldown: self.refresh_cooldown,
            streak_cooldown: self.streak_cooldown,
        })
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
