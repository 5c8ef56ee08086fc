//! Static achievement definitions.

use super::types::{AchievementDef, AchievementMetric, AchievementRankDef};
use crate::core::leveling::Reward;

const fn rank(requirement: u64, exp: i64, gold: i64) -> AchievementRankDef {
    AchievementRankDef {
        requirement,
        reward: Reward::new(exp, gold),
    }
}

/// All achievement definitions in display order.
pub const ALL_ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "level_climber",
        name: "Level Climber",
        description: "Reach higher levels",
        metric: AchievementMetric::Level,
        ranks: &[
            rank(5, 50, 25),
            rank(10, 100, 50),
            rank(25, 250, 100),
            rank(50, 500, 250),
            rank(100, 1000, 500),
        ],
    },
    AchievementDef {
        id: "quest_master",
        name: "Quest Master",
        description: "Complete quests",
        metric: AchievementMetric::QuestsCompleted,
        ranks: &[
            rank(1, 25, 10),
            rank(10, 75, 30),
            rank(50, 200, 100),
            rank(100, 400, 200),
            rank(500, 1000, 500),
        ],
    },
    AchievementDef {
        id: "unbroken",
        name: "Unbroken",
        description: "Keep a daily streak alive",
        metric: AchievementMetric::Streak,
        ranks: &[
            rank(3, 50, 20),
            rank(7, 120, 50),
            rank(30, 500, 200),
            rank(100, 1500, 600),
        ],
    },
    AchievementDef {
        id: "treasure_hoarder",
        name: "Treasure Hoarder",
        description: "Hold gold in your purse",
        metric: AchievementMetric::Gold,
        ranks: &[rank(500, 50, 0), rank(2_000, 150, 0), rank(10_000, 500, 0)],
    },
    AchievementDef {
        id: "rising_hunter",
        name: "Rising Hunter",
        description: "Climb the hunter ranks",
        metric: AchievementMetric::Rank,
        ranks: &[
            rank(1, 100, 50),
            rank(2, 200, 100),
            rank(3, 400, 200),
            rank(4, 800, 400),
            rank(5, 1600, 800),
        ],
    },
    AchievementDef {
        id: "boss_slayer",
        name: "Boss Slayer",
        description: "Defeat bosses",
        metric: AchievementMetric::BossesDefeated,
        ranks: &[
            rank(1, 50, 25),
            rank(5, 150, 75),
            rank(25, 500, 250),
            rank(100, 1500, 750),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirements_strictly_increase() {
        for def in ALL_ACHIEVEMENTS {
            assert!(!def.ranks.is_empty(), "{} has no ranks", def.id);
            for pair in def.ranks.windows(2) {
                assert!(
                    pair[1].requirement > pair[0].requirement,
                    "{} requirements must increase",
                    def.id
                );
            }
        }
    }

    #[test]
    fn test_quest_master_ranks() {
        let def = ALL_ACHIEVEMENTS
            .iter()
            .find(|def| def.id == "quest_master")
            .unwrap();
        assert_eq!(def.metric, AchievementMetric::QuestsCompleted);
        assert_eq!(def.rank(1).unwrap().requirement, 1);
        assert!(def.rank(0).is_none());
    }
}
