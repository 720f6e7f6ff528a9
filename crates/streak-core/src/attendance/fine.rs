//! Day outcomes and the weekly fine law

use serde::{Deserialize, Serialize};

/// Outcome of one day window for one member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Pass,
    Fail,
    Undetermined,
}

impl DayStatus {
    /// Classify a day from its qualifying count
    pub fn from_counts(determined: bool, qualified: usize) -> Self {
        match (determined, qualified) {
            (false, _) => Self::Undetermined,
            (true, 0) => Self::Fail,
            (true, _) => Self::Pass,
        }
    }
}

/// How the caller derives the weekly base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "unit")]
pub enum FinePolicy {
    /// Same unit for everybody
    Flat(u64),
    /// Unit multiplied by the number of members charged that week
    Pooled(u64),
}

impl FinePolicy {
    /// Base unit for a week with `charged_members` members in scope
    pub fn base_unit(&self, charged_members: usize) -> u64 {
        match *self {
            Self::Flat(unit) => unit,
            Self::Pooled(unit) => unit.saturating_mul(charged_members as u64),
        }
    }
}

impl Default for FinePolicy {
    fn default() -> Self {
        Self::Pooled(100)
    }
}

/// `0` for a clean week, else `2^failed_days * base_unit`
pub fn fine_amount(failed_days: u32, base_unit: u64) -> u64 {
    if failed_days == 0 {
        return 0;
    }
    1u64.checked_shl(failed_days)
        .map_or(u64::MAX, |factor| factor.saturating_mul(base_unit))
}
