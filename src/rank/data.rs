//! Static rank requirement table.

use super::types::{Rank, RankRequirement};

/// Requirements to reach each rank above E, in ascending order.
pub const RANK_REQUIREMENTS: &[RankRequirement] = &[
    RankRequirement {
        rank: Rank::D,
        level: 5,
        quests_completed: 10,
        achievements_unlocked: 2,
    },
    RankRequirement {
        rank: Rank::C,
        level: 10,
        quests_completed: 30,
        achievements_unlocked: 3,
    },
    RankRequirement {
        rank: Rank::B,
        level: 20,
        quests_completed: 75,
        achievements_unlocked: 4,
    },
    RankRequirement {
        rank: Rank::A,
        level: 35,
        quests_completed: 150,
        achievements_unlocked: 5,
    },
    RankRequirement {
        rank: Rank::S,
        level: 50,
        quests_completed: 300,
        achievements_unlocked: 6,
    },
];

/// Looks up the requirement for `rank` in `table`.
pub fn requirement_for(table: &[RankRequirement], rank: Rank) -> Option<&RankRequirement> {
    table.iter().find(|req| req.rank == rank)
}
