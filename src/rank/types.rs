use serde::{Deserialize, Serialize};
use std::fmt;

/// Hunter rank tiers, lowest to highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Rank {
    #[default]
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 6] = [Rank::E, Rank::D, Rank::C, Rank::B, Rank::A, Rank::S];

    /// Position in [`Rank::ALL`] (E = 0, S = 5).
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Rank> {
        Rank::ALL.get(index as usize).copied()
    }

    /// The rank directly above this one, `None` at S.
    pub fn next(self) -> Option<Rank> {
        Rank::from_index(self.index() + 1)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::E => "E-Rank",
            Rank::D => "D-Rank",
            Rank::C => "C-Rank",
            Rank::B => "B-Rank",
            Rank::A => "A-Rank",
            Rank::S => "S-Rank",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thresholds to reach `rank`. Every metric must be at or above its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankRequirement {
    pub rank: Rank,
    pub level: u32,
    pub quests_completed: u32,
    pub achievements_unlocked: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    Level,
    QuestsCompleted,
    AchievementsUnlocked,
}

/// Progress on a single rank metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricProgress {
    pub metric: RankMetric,
    pub current: u64,
    pub required: u64,
    /// 0.0 - 100.0, capped
    pub percent: f64,
}

/// Snapshot of how close a hunter is to the next rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankProgress {
    pub current: Rank,
    pub next: Option<Rank>,
    pub metrics: Vec<MetricProgress>,
    /// Average of the metric percentages (always 100 at the top rank)
    pub overall_percent: f64,
}

impl RankProgress {
    /// True when the next rank exists and every metric is satisfied on average.
    pub fn ready(&self) -> bool {
        self.next.is_some() && self.overall_percent >= 100.0
    }
}
