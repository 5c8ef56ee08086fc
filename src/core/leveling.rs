//! Leveling: applies signed experience and gold deltas to a profile,
//! cascading through as many level transitions as the delta covers.

use super::experience::exp_needed;
use super::profile::PlayerProfile;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg};

/// A signed experience/gold adjustment. Rewards are positive, penalties negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub exp: i64,
    pub gold: i64,
}

impl Reward {
    pub const ZERO: Reward = Reward { exp: 0, gold: 0 };

    pub const fn new(exp: i64, gold: i64) -> Self {
        Self { exp, gold }
    }

    /// A penalty built from positive magnitudes.
    pub const fn penalty(exp: i64, gold: i64) -> Self {
        Self {
            exp: -exp,
            gold: -gold,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.exp == 0 && self.gold == 0
    }
}

impl Add for Reward {
    type Output = Reward;

    fn add(self, rhs: Reward) -> Reward {
        Reward {
            exp: self.exp.saturating_add(rhs.exp),
            gold: self.gold.saturating_add(rhs.gold),
        }
    }
}

impl AddAssign for Reward {
    fn add_assign(&mut self, rhs: Reward) {
        *self = *self + rhs;
    }
}

impl Neg for Reward {
    type Output = Reward;

    fn neg(self) -> Reward {
        Reward {
            exp: self.exp.saturating_neg(),
            gold: self.gold.saturating_neg(),
        }
    }
}

impl std::iter::Sum for Reward {
    fn sum<I: Iterator<Item = Reward>>(iter: I) -> Reward {
        iter.fold(Reward::ZERO, |acc, r| acc + r)
    }
}

/// Outcome of a leveling call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChange {
    pub level_before: u32,
    pub level_after: u32,
    pub levels_gained: u32,
    pub levels_lost: u32,
    pub exp_after: u64,
    pub exp_needed: u64,
    pub gold_after: u64,
}

impl LevelChange {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }

    pub fn leveled_down(&self) -> bool {
        self.levels_lost > 0
    }
}

/// Applies an experience delta and processes any level transitions.
///
/// Positive deltas level up while `exp >= exp_needed(level)`. Negative deltas
/// level down while `exp < 0`, refunding the lower level's threshold each
/// step; at level 1 any remaining deficit is clamped to 0. Afterwards
/// `0 <= exp < exp_needed` holds and `exp_needed` is refreshed.
pub fn apply_delta(profile: &mut PlayerProfile, delta: i64) -> LevelChange {
    let level_before = profile.level.max(1);
    let mut level = level_before;
    let mut exp = profile.exp as i128 + delta as i128;

    if delta >= 0 {
        while exp >= exp_needed(level) as i128 {
            exp -= exp_needed(level) as i128;
            level += 1;
        }
    } else {
        while exp < 0 && level > 1 {
            level -= 1;
            exp += exp_needed(level) as i128;
        }
        if exp < 0 {
            exp = 0;
        }
    }

    profile.level = level;
    profile.exp = exp as u64;
    profile.exp_needed = exp_needed(level);

    LevelChange {
        level_before,
        level_after: level,
        levels_gained: level.saturating_sub(level_before),
        levels_lost: level_before.saturating_sub(level),
        exp_after: profile.exp,
        exp_needed: profile.exp_needed,
        gold_after: profile.gold,
    }
}

/// Applies a gold delta, clamping at zero. Returns the new balance.
pub fn apply_gold(profile: &mut PlayerProfile, delta: i64) -> u64 {
    let gold = profile.gold as i128 + delta as i128;
    profile.gold = gold.clamp(0, u64::MAX as i128) as u64;
    profile.gold
}

/// Applies both halves of a reward in a single leveling call.
pub fn apply_reward(profile: &mut PlayerProfile, reward: Reward) -> LevelChange {
    apply_gold(profile, reward.gold);
    apply_delta(profile, reward.exp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn profile_at(level: u32, exp: u64) -> PlayerProfile {
        let mut profile = PlayerProfile::new("leveling-test", Utc::now());
        profile.level = level;
        profile.exp = exp;
        profile.exp_needed = exp_needed(level);
        profile
    }

    #[test]
    fn test_small_gain_no_level() {
        let mut profile = profile_at(1, 0);
        let change = apply_delta(&mut profile, 40);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.exp, 40);
        assert!(!change.leveled_up());
    }

    #[test]
    fn test_gain_cascades_two_levels() {
        // 100 consumed at L1, 150 at L2, nothing left, L3 needs 200
        let mut profile = profile_at(1, 0);
        let change = apply_delta(&mut profile, 250);
        assert_eq!(profile.level, 3);
        assert_eq!(profile.exp, 0);
        assert_eq!(profile.exp_needed, 200);
        assert_eq!(change.levels_gained, 2);
    }

    #[test]
    fn test_large_gain_cascades_many_levels() {
        let mut profile = profile_at(1, 0);
        let change = apply_delta(&mut profile, 2500);
        assert!(change.levels_gained > 1);
        assert!(profile.exp < profile.exp_needed);
    }

    #[test]
    fn test_penalty_drops_one_level() {
        // -70 + exp_needed(4)=250 -> 180
        let mut profile = profile_at(5, 30);
        let change = apply_delta(&mut profile, -100);
        assert_eq!(profile.level, 4);
        assert_eq!(profile.exp, 180);
        assert_eq!(profile.exp_needed, 250);
        assert_eq!(change.levels_lost, 1);
    }

    #[test]
    fn test_huge_penalty_floors_at_level_one() {
        let mut profile = profile_at(5, 30);
        let change = apply_delta(&mut profile, -1_000_000);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.exp, 0);
        assert_eq!(change.levels_lost, 4);
    }

    #[test]
    fn test_penalty_within_level() {
        let mut profile = profile_at(2, 120);
        apply_delta(&mut profile, -20);
        assert_eq!(profile.level, 2);
        assert_eq!(profile.exp, 100);
    }

    #[test]
    fn test_gold_clamps_at_zero() {
        let mut profile = profile_at(1, 0);
        profile.gold = 30;
        assert_eq!(apply_gold(&mut profile, -50), 0);
        assert_eq!(apply_gold(&mut profile, 15), 15);
    }

    #[test]
    fn test_apply_reward_updates_both() {
        let mut profile = profile_at(1, 0);
        let change = apply_reward(&mut profile, Reward::new(150, 20));
        assert_eq!(change.level_after, 2);
        assert_eq!(profile.exp, 50);
        assert_eq!(change.gold_after, 20);
    }

    #[test]
    fn test_reward_arithmetic() {
        let total: Reward = [Reward::new(10, 5), Reward::penalty(4, 1)].into_iter().sum();
        assert_eq!(total, Reward::new(6, 4));
        assert_eq!(-total, Reward::new(-6, -4));
        assert!(Reward::ZERO.is_zero());
    }
}
