//! Achievement system types and data structures.

use crate::core::leveling::Reward;
use crate::core::profile::PlayerProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The profile value an achievement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementMetric {
    Level,
    QuestsCompleted,
    Streak,
    Gold,
    /// Rank index (E = 0 ... S = 5)
    Rank,
    BossesDefeated,
}

impl AchievementMetric {
    /// Reads the metric's current value from a profile.
    pub fn current_value(&self, profile: &PlayerProfile) -> u64 {
        match self {
            AchievementMetric::Level => profile.level as u64,
            AchievementMetric::QuestsCompleted => profile.quests_completed as u64,
            AchievementMetric::Streak => profile.streak as u64,
            AchievementMetric::Gold => profile.gold,
            AchievementMetric::Rank => profile.rank.index() as u64,
            AchievementMetric::BossesDefeated => profile.total_bosses_defeated(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AchievementMetric::Level => "Level",
            AchievementMetric::QuestsCompleted => "Quests Completed",
            AchievementMetric::Streak => "Streak",
            AchievementMetric::Gold => "Gold",
            AchievementMetric::Rank => "Rank",
            AchievementMetric::BossesDefeated => "Bosses Defeated",
        }
    }
}

/// One rank of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementRankDef {
    pub requirement: u64,
    pub reward: Reward,
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub metric: AchievementMetric,
    /// Ordered, strictly increasing requirements
    pub ranks: &'static [AchievementRankDef],
}

impl AchievementDef {
    pub fn max_rank(&self) -> u32 {
        self.ranks.len() as u32
    }

    /// Definition of rank `rank` (1-based).
    pub fn rank(&self, rank: u32) -> Option<&AchievementRankDef> {
        rank.checked_sub(1)
            .and_then(|index| self.ranks.get(index as usize))
    }
}

/// Stored progress on one achievement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub current_rank: u32,
    #[serde(default)]
    pub last_advanced_at: Option<DateTime<Utc>>,
}

/// An achievement that moved up one rank during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementAdvance {
    pub id: String,
    pub name: String,
    pub new_rank: u32,
    /// True when this was the achievement's first rank
    pub first_unlock: bool,
    pub reward: Reward,
}

/// Result of evaluating every achievement once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementPass {
    pub advances: Vec<AchievementAdvance>,
    pub total_reward: Reward,
}

impl AchievementPass {
    pub fn is_empty(&self) -> bool {
        self.advances.is_empty()
    }
}

/// Where a hunter stands on one achievement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementStatus {
    pub id: String,
    pub name: String,
    pub metric: AchievementMetric,
    pub current_rank: u32,
    pub max_rank: u32,
    pub current_value: u64,
    /// Requirement of the next rank; `None` once maxed
    pub next_requirement: Option<u64>,
}
