//! Cooldown gate for expensive, recompute-triggering operations
//!
//! Each key carries a "next eligible" instant. An acquire before that instant is
//! refused without touching state; an acquire at or after it succeeds and pushes
//! the instant forward by the requested interval.

use chrono::{DateTime, Duration, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;

use streak_core::traits::Clock;

/// Operations that are rate-limited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CooldownAction {
    /// Fleet-wide sync and profile refresh
    Refresh,
    /// On-demand streak check
    StreakCheck,
}

/// Gate key: an action, optionally scoped to one requester
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CooldownKey {
    Global(CooldownAction),
    Scoped(CooldownAction, String),
}

impl CooldownKey {
    pub fn global(action: CooldownAction) -> Self {
        Self::Global(action)
    }

    pub fn scoped(action: CooldownAction, scope: impl Into<String>) -> Self {
        Self::Scoped(action, scope.into())
    }
}

impl fmt::Display for CooldownKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global(action) => write!(f, "{action:?}"),
            Self::Scoped(action, scope) => write!(f, "{action:?}:{scope}"),
        }
    }
}

/// In-process cooldown map
pub struct CooldownGate {
    clock: Arc<dyn Clock>,
    next_eligible: DashMap<CooldownKey, DateTime<Utc>>,
}

impl CooldownGate {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            next_eligible: DashMap::new(),
        }
    }

    /// Try to pass the gate now
    pub fn try_acquire(&self, key: CooldownKey, interval: Duration) -> bool {
        self.try_acquire_at(key, interval, self.clock.now())
    }

    /// Try to pass the gate at an explicit instant
    ///
    /// The check and the update happen under the key's shard lock.
    pub fn try_acquire_at(&self, key: CooldownKey, interval: Duration, now: DateTime<Utc>) -> bool {
        match self.next_eligible.entry(key) {
            Entry::Occupied(mut slot) => {
                if now < *slot.get() {
                    false
                } else {
                    slot.insert(now + interval);
                    true
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(now + interval);
                true
            }
        }
    }

    /// Next eligible instant, if still in the future
    pub fn retry_after(&self, key: &CooldownKey) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        self.next_eligible
            .get(key)
            .map(|next| *next)
            .filter(|next| now < *next)
    }

    /// Forget every key
    pub fn reset(&self) {
        self.next_eligible.clear();
    }
}

impl fmt::Debug for CooldownGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CooldownGate")
            .field("keys", &self.next_eligible.len())
            .finish()
    }
}
