use crate::error::GameError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    #[default]
    Normal,
    Daily,
}

impl QuestKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuestKind::Normal => "normal",
            QuestKind::Daily => "daily",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Unit label for the count ("pushups", "pages", "times")
    pub metric: String,
    pub target_count: u32,
    pub current_count: u32,
    pub kind: QuestKind,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Daily quests only
    #[serde(default)]
    pub last_completion: Option<DateTime<Utc>>,
    /// Daily quests only
    #[serde(default)]
    pub last_reset: Option<DateTime<Utc>>,
}

impl Quest {
    pub fn is_daily(&self) -> bool {
        self.kind == QuestKind::Daily
    }
}

/// User input for creating a quest. Missing or invalid fields fall back to
/// defaults instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSpec {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metric: Option<String>,
    #[serde(default)]
    pub target_count: Option<i64>,
    #[serde(default)]
    pub kind: QuestKind,
}

/// How far to move a quest: a number of units, or straight to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressInput {
    Amount(u32),
    Complete,
}

impl FromStr for ProgressInput {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("complete") {
            return Ok(ProgressInput::Complete);
        }
        s.parse::<u32>()
            .map(ProgressInput::Amount)
            .map_err(|_| GameError::Validation(format!("invalid progress amount: {:?}", s)))
    }
}

/// Result of moving a quest's counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressOutcome {
    pub previous_count: u32,
    pub new_count: u32,
    /// True when this update completed the quest
    pub completed: bool,
}
