//! Background task tracking
//!
//! Long-running work (registration backfill, fleet refresh) is spawned on the
//! tokio runtime and observed by id.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, Instrument};
use uuid::Uuid;

use streak_core::traits::Clock;

use super::error::ServiceResult;

/// What a tracked task does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// Backdated first sync after registration
    InitialSync,
    /// Sync every active member, then refresh every profile
    FleetRefresh,
}

/// Observable state of a tracked task
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaskStatus {
    Running,
    Succeeded { summary: serde_json::Value },
    Failed { error: String },
}

impl TaskStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Snapshot of one task
#[derive(Debug, Clone, Serialize)]
pub struct TaskInfo {
    pub id: Uuid,
    pub kind: TaskKind,
    pub started_at: DateTime<Utc>,
    pub status: TaskStatus,
}

struct TaskEntry {
    kind: TaskKind,
    started_at: DateTime<Utc>,
    status: watch::Receiver<TaskStatus>,
}

/// How long a finished task stays observable
pub const DEFAULT_TASK_RETENTION_SECS: i64 = 3600;

/// Registry of spawned background tasks
///
/// Finished tasks started more than the retention window ago are dropped
/// whenever a new task is spawned.
pub struct TaskTracker {
    clock: Arc<dyn Clock>,
    retention: Duration,
    tasks: DashMap<Uuid, TaskEntry>,
}

impl TaskTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_retention(clock, Duration::seconds(DEFAULT_TASK_RETENTION_SECS))
    }

    pub fn with_retention(clock: Arc<dyn Clock>, retention: Duration) -> Self {
        Self {
            clock,
            retention,
            tasks: DashMap::new(),
        }
    }

    /// Spawn `work` and return its id
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&self, kind: TaskKind, work: F) -> Uuid
    where
        F: Future<Output = ServiceResult<serde_json::Value>> + Send + 'static,
    {
        self.prune_expired();

        let id = Uuid::new_v4();
        let (tx, rx) = watch::channel(TaskStatus::Running);
        self.tasks.insert(
            id,
            TaskEntry {
                kind,
                started_at: self.clock.now(),
                status: rx,
            },
        );

        let span = tracing::info_span!("task", task_id = %id, kind = ?kind);
        tokio::spawn(
            async move {
                let status = match work.await {
                    Ok(summary) => {
                        info!("Task succeeded");
                        TaskStatus::Succeeded { summary }
                    }
                    Err(e) => {
                        error!(error = %e, "Task failed");
                        TaskStatus::Failed {
                            error: e.to_string(),
                        }
                    }
                };
                // Fails only once the entry has been pruned
                let _ = tx.send(status);
            }
            .instrument(span),
        );

        id
    }

    /// Current snapshot of a task
    pub fn get(&self, id: Uuid) -> Option<TaskInfo> {
        self.tasks.get(&id).map(|entry| TaskInfo {
            id,
            kind: entry.kind,
            started_at: entry.started_at,
            status: entry.status.borrow().clone(),
        })
    }

    /// Wait until a task leaves `Running`
    pub async fn wait(&self, id: Uuid) -> Option<TaskStatus> {
        let mut rx = self.tasks.get(&id).map(|entry| entry.status.clone())?;
        let status = rx.wait_for(TaskStatus::is_finished).await.ok()?.clone();
        Some(status)
    }

    /// Drop every finished task from the registry
    pub fn prune_finished(&self) -> usize {
        self.prune_where(|_| true)
    }

    /// Drop finished tasks started before the retention window
    pub fn prune_expired(&self) -> usize {
        let cutoff = self.clock.now() - self.retention;
        self.prune_where(|entry| entry.started_at < cutoff)
    }

    fn prune_where(&self, expired: impl Fn(&TaskEntry) -> bool) -> usize {
        let mut removed = 0;
        self.tasks.retain(|_, entry| {
            let gone = entry.status.borrow().is_finished() && expired(entry);
            if gone {
                removed += 1;
            }
            !gone
        });
        removed
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl std::fmt::Debug for TaskTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskTracker").field("tasks", &self.tasks.len()).finish()
    }
}
