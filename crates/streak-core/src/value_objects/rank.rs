//! Judge ranks: member tiers and problem difficulty levels
//!
//! Both follow the judge's ordinal scale. `1..=30` runs Bronze V through Ruby I in
//! five-step groups, `0` is unrated. Tiers additionally have `31` (Master).

use serde::{Deserialize, Serialize};
use std::fmt;

const GROUPS: [&str; 6] = ["Bronze", "Silver", "Gold", "Platinum", "Diamond", "Ruby"];
const NUMERALS: [&str; 5] = ["V", "IV", "III", "II", "I"];

/// Rank value outside the judge's scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RankError {
    #[error("tier out of range: {0}")]
    TierOutOfRange(i64),

    #[error("level out of range: {0}")]
    LevelOutOfRange(i64),
}

fn rank_name(value: u8) -> String {
    match value {
        0 => "Unrated".to_string(),
        1..=30 => {
            let idx = usize::from(value - 1);
            format!("{} {}", GROUPS[idx / 5], NUMERALS[idx % 5])
        }
        _ => "Master".to_string(),
    }
}

/// Member skill tier (0 = unrated, 31 = Master)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const UNRATED: Tier = Tier(0);
    pub const MASTER: Tier = Tier(31);

    pub fn new(value: i64) -> Result<Self, RankError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MASTER.0)
            .map(Self)
            .ok_or(RankError::TierOutOfRange(value))
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Display name, e.g. "Gold III"
    pub fn name(self) -> String {
        rank_name(self.0)
    }
}

impl TryFrom<i64> for Tier {
    type Error = RankError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Problem difficulty level (0 = unrated, 30 = Ruby I)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const UNRATED: Level = Level(0);
    pub const MAX: Level = Level(30);

    pub fn new(value: i64) -> Result<Self, RankError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX.0)
            .map(Self)
            .ok_or(RankError::LevelOutOfRange(value))
    }

    /// Build a level from a constant known to be in range
    pub(crate) const fn from_const(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self.0
    }

    pub fn name(self) -> String {
        rank_name(self.0)
    }
}

impl TryFrom<i64> for Level {
    type Error = RankError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
