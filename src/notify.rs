//! Notifications emitted after a change commits.
//!
//! Sinks are fire-and-forget: the engine never waits on delivery.

use crate::core::leveling::{LevelChange, Reward};
use crate::rank::types::Rank;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    QuestCreated {
        quest_id: String,
        title: String,
    },
    QuestCompleted {
        quest_id: String,
        title: String,
        reward: Reward,
    },
    QuestDeleted {
        quest_id: String,
    },
    LevelUp {
        level: u32,
    },
    LevelDown {
        level: u32,
    },
    RankUp {
        rank: Rank,
    },
    AchievementUnlocked {
        id: String,
        name: String,
        rank: u32,
    },
    BossBattleStarted {
        boss_id: String,
        target_count: u32,
        end_time: DateTime<Utc>,
    },
    BossDefeated {
        boss_id: String,
        reward: Reward,
        title: Option<String>,
    },
    BossTimedOut {
        boss_id: String,
        penalty: Reward,
    },
    DailyReset {
        date: NaiveDate,
        net: Reward,
    },
    PenaltyApplied {
        exp: u64,
    },
}

/// Level transitions worth telling the player about.
pub fn level_notifications(change: &LevelChange) -> Vec<Notification> {
    if change.leveled_up() {
        vec![Notification::LevelUp {
            level: change.level_after,
        }]
    } else if change.leveled_down() {
        vec![Notification::LevelDown {
            level: change.level_after,
        }]
    } else {
        Vec::new()
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Logs every notification at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notification: Notification) {
        tracing::info!(?notification, "hunter notification");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}

/// Forwards notifications over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notification: Notification) {
        // A closed receiver just means nobody is listening
        let _ = self.tx.send(notification);
    }
}
