use super::types::{BossBattle, BossDefinition};
use crate::core::leveling::Reward;
use chrono::{DateTime, Utc};

/// Target after `defeats` prior victories: `base + defeats * scaling`.
pub fn scaled_target(def: &BossDefinition, defeats: u32) -> u32 {
    def.base_target_count
        .saturating_add(defeats.saturating_mul(def.scaling.target_count))
}

/// Reward after `defeats` prior victories.
pub fn scaled_reward(def: &BossDefinition, defeats: u32) -> Reward {
    let defeats = defeats as i64;
    Reward::new(
        def.rewards.exp + defeats * def.scaling.exp,
        def.rewards.gold + defeats * def.scaling.gold,
    )
}

/// Opens a battle scaled to the hunter's current defeat count.
pub fn start_battle(def: &BossDefinition, defeats: u32, now: DateTime<Utc>) -> BossBattle {
    let reward = scaled_reward(def, defeats);
    BossBattle {
        boss_id: def.id.to_string(),
        target_count: scaled_target(def, defeats),
        current_count: 0,
        reward_exp: reward.exp,
        reward_gold: reward.gold,
        start_time: now,
        end_time: now + def.time_limit(),
        penalty_applied: false,
    }
}

/// Adds progress. Returns true once the target is reached.
pub fn advance(battle: &mut BossBattle, amount: u32) -> bool {
    battle.current_count = battle.current_count.saturating_add(amount);
    battle.is_won()
}
