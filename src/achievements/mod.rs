//! Achievement system module.
//!
//! Multi-rank achievements driven by profile metrics. Each rank carries its
//! own reward; the first rank reached marks the achievement as unlocked.

pub mod data;
pub mod logic;
pub mod types;

pub use data::ALL_ACHIEVEMENTS;
pub use logic::{apply_pass, evaluate_pass, next_rank_progress, progress_report};
pub use types::{
    AchievementAdvance, AchievementDef, AchievementMetric, AchievementPass, AchievementRankDef,
    AchievementRecord, AchievementStatus,
};
