//! Static boss catalog.

use super::types::{BossDefinition, BossRewards, BossScaling};

/// All bosses in display order.
pub const ALL_BOSSES: &[BossDefinition] = &[
    BossDefinition {
        id: "goblin_chief",
        name: "Goblin Chief",
        description: "A warm-up brawl. Knock out a quick set before the hour is up.",
        metric: "reps",
        base_target_count: 10,
        time_limit_secs: 60 * 60,
        rewards: BossRewards {
            exp: 100,
            gold: 50,
            title: None,
        },
        scaling: BossScaling {
            target_count: 2,
            exp: 20,
            gold: 10,
        },
    },
    BossDefinition {
        id: "iron_golem",
        name: "Iron Golem",
        description: "Slow and relentless. Grind it down within a day.",
        metric: "sets",
        base_target_count: 25,
        time_limit_secs: 24 * 60 * 60,
        rewards: BossRewards {
            exp: 300,
            gold: 150,
            title: Some("Golem Breaker"),
        },
        scaling: BossScaling {
            target_count: 5,
            exp: 50,
            gold: 25,
        },
    },
    BossDefinition {
        id: "shadow_monarch",
        name: "Shadow Monarch",
        description: "The final trial. A week-long siege against your own limits.",
        metric: "sessions",
        base_target_count: 50,
        time_limit_secs: 7 * 24 * 60 * 60,
        rewards: BossRewards {
            exp: 1500,
            gold: 750,
            title: Some("Shadow Sovereign"),
        },
        scaling: BossScaling {
            target_count: 10,
            exp: 250,
            gold: 100,
        },
    },
];
