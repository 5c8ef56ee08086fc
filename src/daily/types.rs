use crate::core::leveling::{LevelChange, Reward};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A numeric goal tracked per calendar day (water intake, steps, pages).
///
/// Settled at the day boundary: `reward` when `current >= target`, otherwise
/// `penalty` (stored as positive magnitudes) is subtracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyGoalTrack {
    pub id: String,
    pub name: String,
    pub unit: String,
    pub target: u32,
    pub current: u32,
    pub reward: Reward,
    pub penalty: Reward,
}

impl DailyGoalTrack {
    pub fn is_met(&self) -> bool {
        self.current >= self.target
    }
}

/// User input for a new goal track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub target: u32,
    #[serde(default)]
    pub reward: Reward,
    #[serde(default)]
    pub penalty: Reward,
}

/// How one track settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackOutcome {
    pub track_id: String,
    pub current: u32,
    pub target: u32,
    pub met: bool,
    pub delta: Reward,
}

/// The day's net adjustment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySettlement {
    pub incomplete_quests: u32,
    pub quest_penalty: Reward,
    pub track_outcomes: Vec<TrackOutcome>,
    pub net: Reward,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResetReport {
    pub date: NaiveDate,
    pub previous_reset: NaiveDate,
    pub settlement: DailySettlement,
    pub level_change: LevelChange,
    pub quests_reset: usize,
    pub streak: u32,
}

/// What a reset check did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResetOutcome {
    /// Already reset today
    AlreadyCurrent { date: NaiveDate },
    /// Another reset for this player is in flight; this trigger was dropped
    InFlight,
    /// First check for a profile that had never been reset; no settlement
    Initialized { date: NaiveDate },
    Applied(DailyResetReport),
}
