//! Engine configuration.
//!
//! Loaded from `~/.hunter/config.json` when present; any missing field keeps
//! its default.

use crate::core::constants::*;
use crate::core::leveling::Reward;
use crate::utils::persistence::load_json_or_default;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Experience lost per daily quest left incomplete at the day boundary
    pub daily_quest_penalty_exp: i64,
    pub daily_quest_penalty_gold: i64,
    /// Experience lost when a boss battle runs out of time
    pub boss_timeout_penalty_exp: i64,
    pub boss_timeout_penalty_gold: i64,
    pub daily_check_interval_secs: u64,
    pub boss_check_interval_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            daily_quest_penalty_exp: DAILY_QUEST_MISSED_PENALTY_EXP,
            daily_quest_penalty_gold: DAILY_QUEST_MISSED_PENALTY_GOLD,
            boss_timeout_penalty_exp: BOSS_TIMEOUT_PENALTY_EXP,
            boss_timeout_penalty_gold: BOSS_TIMEOUT_PENALTY_GOLD,
            daily_check_interval_secs: DAILY_RESET_CHECK_INTERVAL_SECONDS,
            boss_check_interval_secs: BOSS_TIMEOUT_CHECK_INTERVAL_SECONDS,
        }
    }
}

impl EngineConfig {
    /// Loads the config at `path`, falling back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        load_json_or_default(path)
    }

    /// Signed adjustment for one incomplete daily quest.
    pub fn daily_quest_penalty(&self) -> Reward {
        Reward::penalty(
            self.daily_quest_penalty_exp.saturating_abs(),
            self.daily_quest_penalty_gold.saturating_abs(),
        )
    }

    /// Signed adjustment for a timed-out boss battle.
    pub fn boss_timeout_penalty(&self) -> Reward {
        Reward::penalty(
            self.boss_timeout_penalty_exp.saturating_abs(),
            self.boss_timeout_penalty_gold.saturating_abs(),
        )
    }

    pub fn daily_check_interval(&self) -> Duration {
        Duration::from_secs(self.daily_check_interval_secs.max(1))
    }

    pub fn boss_check_interval(&self) -> Duration {
        Duration::from_secs(self.boss_check_interval_secs.max(1))
    }
}
