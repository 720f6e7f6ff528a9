//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod context;
pub mod cooldown;
pub mod error;
pub mod fines;
pub mod maintenance;
pub mod members;
pub mod reminders;
pub mod streak;
pub mod sync;
pub mod tasks;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use cooldown::{CooldownAction, CooldownGate, CooldownKey};
pub use error::{ServiceError, ServiceResult};
pub use fines::FineAccountant;
pub use maintenance::MaintenanceService;
pub use members::MemberService;
pub use reminders::ReminderService;
pub use streak::StreakService;
pub use sync::{ProblemSyncEngine, SyncMode};
pub use tasks::{TaskInfo, TaskKind, TaskStatus, TaskTracker};
