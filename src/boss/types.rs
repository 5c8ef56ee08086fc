use crate::core::leveling::Reward;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Base rewards for a first defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossRewards {
    pub exp: i64,
    pub gold: i64,
    /// Title granted on defeat, if any
    pub title: Option<&'static str>,
}

/// Growth per prior defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossScaling {
    pub target_count: u32,
    pub exp: i64,
    pub gold: i64,
}

/// Static definition of a boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Unit label for the count
    pub metric: &'static str,
    pub base_target_count: u32,
    pub time_limit_secs: i64,
    pub rewards: BossRewards,
    pub scaling: BossScaling,
}

impl BossDefinition {
    pub fn time_limit(&self) -> Duration {
        Duration::seconds(self.time_limit_secs)
    }
}

/// A running challenge against one boss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossBattle {
    pub boss_id: String,
    pub target_count: u32,
    pub current_count: u32,
    pub reward_exp: i64,
    pub reward_gold: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Set inside the timeout transaction before the penalty is applied
    #[serde(default)]
    pub penalty_applied: bool,
}

impl BossBattle {
    /// Strictly past the deadline.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.end_time
    }

    pub fn is_won(&self) -> bool {
        self.current_count >= self.target_count
    }

    pub fn remaining_time(&self, now: DateTime<Utc>) -> Duration {
        (self.end_time - now).max(Duration::zero())
    }

    /// Reward computed when the battle started.
    pub fn quoted_reward(&self) -> Reward {
        Reward::new(self.reward_exp, self.reward_gold)
    }
}

/// Summary of a boss defeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossVictory {
    pub boss_id: String,
    pub boss_name: String,
    /// Defeat count after this victory
    pub defeats: u32,
    pub reward: Reward,
    pub title: Option<String>,
    pub new_title: bool,
}

/// Summary of a battle that ran out of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossTimeout {
    pub boss_id: String,
    pub penalty: Reward,
    pub final_count: u32,
    pub target_count: u32,
}
