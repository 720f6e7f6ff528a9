//! # streak-service
//!
//! Application layer: problem sync, fine accounting, cooldowns, background tasks,
//! and the member use cases built on them.

pub mod dto;
pub mod services;

pub use services::{
    CooldownAction, CooldownGate, CooldownKey, FineAccountant, MaintenanceService,
    MemberService, ProblemSyncEngine, ReminderService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, StreakService, SyncMode, TaskInfo, TaskKind, TaskStatus,
    TaskTracker,
};

// Re-export DTOs
pub use dto::{
    ApiResponse, BatchSyncReport, DailyReportResponse, DailyResultResponse, DateQuery,
    FleetRefreshSummary, HealthResponse, MemberResponse, NoticeHourRequest, ProfileRefreshReport,
    ReadinessResponse, RegisterRequest, RegistrationResponse, ReminderResponse, RequalifyResponse,
    SyncQuery, SyncResponse, TaskAcceptedResponse, TaskResponse, WeeklyFineResponse, WeeklyReportResponse,
};
