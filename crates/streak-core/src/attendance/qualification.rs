//! Qualification policy - minimum problem level per member tier

use crate::value_objects::{Level, Tier};

const TIER_COUNT: usize = Tier::MASTER.value() as usize + 1;

const fn group_threshold(tier: u8) -> u8 {
    match tier {
        0..=5 => 0,
        6..=10 => 1,
        11..=15 => 6,
        16..=20 => 11,
        21..=25 => 16,
        _ => 21,
    }
}

const fn standard_table() -> [Level; TIER_COUNT] {
    let mut table = [Level::UNRATED; TIER_COUNT];
    let mut tier = 0;
    while tier < TIER_COUNT {
        table[tier] = Level::from_const(group_threshold(tier as u8));
        tier += 1;
    }
    table
}

/// Static tier -> threshold lookup
///
/// A solve qualifies when the problem level is at least the solver's threshold.
/// Unrated and Bronze members qualify with any problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualificationPolicy {
    thresholds: [Level; TIER_COUNT],
}

impl QualificationPolicy {
    /// The community's standard table
    pub const fn standard() -> Self {
        Self {
            thresholds: standard_table(),
        }
    }

    /// Minimum level a member of `tier` must solve
    #[inline]
    pub fn threshold(&self, tier: Tier) -> Level {
        self.thresholds[usize::from(tier.value())]
    }

    #[inline]
    pub fn qualifies(&self, tier: Tier, level: Level) -> bool {
        level >= self.threshold(tier)
    }
}

impl Default for QualificationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
