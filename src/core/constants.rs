// Experience curve
pub const EXP_BASE: u64 = 100;
pub const EXP_LINEAR_STEP: u64 = 50;
pub const EXP_LINEAR_CAP_LEVEL: u32 = 20;
pub const EXP_GROWTH_RATE: f64 = 1.12;
pub const EXP_LEVEL_FACTOR: f64 = 100.0;

// Quest defaults (applied when user input is missing or invalid)
pub const DEFAULT_QUEST_TITLE: &str = "New Quest";
pub const DEFAULT_QUEST_TARGET: u32 = 5;
pub const DEFAULT_QUEST_METRIC: &str = "times";
pub const DEFAULT_QUEST_DESCRIPTION: &str = "Complete this quest to earn experience and gold.";

// Flat rewards granted when progress reaches the target
pub const DAILY_QUEST_REWARD_EXP: i64 = 50;
pub const DAILY_QUEST_REWARD_GOLD: i64 = 25;
pub const NORMAL_QUEST_REWARD_EXP: i64 = 25;
pub const NORMAL_QUEST_REWARD_GOLD: i64 = 15;

// Scaled rewards granted by direct completion (per unit of target)
pub const COMPLETION_EXP_PER_TARGET: i64 = 10;
pub const COMPLETION_GOLD_PER_TARGET: i64 = 5;

// Penalties (magnitudes)
pub const DAILY_QUEST_MISSED_PENALTY_EXP: i64 = 50;
pub const DAILY_QUEST_MISSED_PENALTY_GOLD: i64 = 0;
pub const BOSS_TIMEOUT_PENALTY_EXP: i64 = 100;
pub const BOSS_TIMEOUT_PENALTY_GOLD: i64 = 50;

// Background checks
pub const DAILY_RESET_CHECK_INTERVAL_SECONDS: u64 = 60;
pub const BOSS_TIMEOUT_CHECK_INTERVAL_SECONDS: u64 = 5;
