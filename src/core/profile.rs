use super::experience::exp_needed;
use crate::achievements::types::AchievementRecord;
use crate::daily::types::DailyGoalTrack;
use crate::rank::types::Rank;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Everything the engine tracks about one hunter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub player_id: String,
    pub level: u32,
    pub exp: u64,
    /// Cached `exp_needed(level)`
    pub exp_needed: u64,
    pub gold: u64,
    pub rank: Rank,
    pub streak: u32,
    /// Last calendar day a daily quest was completed (drives the streak)
    #[serde(default)]
    pub last_streak_date: Option<NaiveDate>,
    pub quests_completed: u32,
    /// Achievement id -> highest rank reached
    #[serde(default)]
    pub achievements: HashMap<String, AchievementRecord>,
    #[serde(default)]
    pub unlocked_achievements: BTreeSet<String>,
    /// Boss id -> number of defeats
    #[serde(default)]
    pub defeated_bosses: HashMap<String, u32>,
    /// Titles earned from bosses, in the order they were earned
    #[serde(default)]
    pub titles: Vec<String>,
    #[serde(default)]
    pub active_title: Option<String>,
    #[serde(default)]
    pub daily_tracks: Vec<DailyGoalTrack>,
    #[serde(default)]
    pub last_daily_reset: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl PlayerProfile {
    /// Creates a fresh level 1 E-rank profile.
    pub fn new(player_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            player_id: player_id.into(),
            level: 1,
            exp: 0,
            exp_needed: exp_needed(1),
            gold: 0,
            rank: Rank::E,
            streak: 0,
            last_streak_date: None,
            quests_completed: 0,
            achievements: HashMap::new(),
            unlocked_achievements: BTreeSet::new(),
            defeated_bosses: HashMap::new(),
            titles: Vec::new(),
            active_title: None,
            daily_tracks: Vec::new(),
            last_daily_reset: None,
            created_at: now,
        }
    }

    /// Number of times `boss_id` has been defeated.
    pub fn defeats_of(&self, boss_id: &str) -> u32 {
        self.defeated_bosses.get(boss_id).copied().unwrap_or(0)
    }

    pub fn total_bosses_defeated(&self) -> u64 {
        self.defeated_bosses.values().map(|&n| n as u64).sum()
    }

    /// Stored rank for an achievement (0 when never reached).
    pub fn achievement_rank(&self, id: &str) -> u32 {
        self.achievements
            .get(id)
            .map(|record| record.current_rank)
            .unwrap_or(0)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked_achievements.len()
    }

    /// Adds a title if it is new. The first title earned becomes active.
    pub fn grant_title(&mut self, title: &str) -> bool {
        if self.titles.iter().any(|t| t == title) {
            return false;
        }
        self.titles.push(title.to_string());
        if self.active_title.is_none() {
            self.active_title = Some(title.to_string());
        }
        true
    }

    pub fn track(&self, track_id: &str) -> Option<&DailyGoalTrack> {
        self.daily_tracks.iter().find(|t| t.id == track_id)
    }

    pub fn track_mut(&mut self, track_id: &str) -> Option<&mut DailyGoalTrack> {
        self.daily_tracks.iter_mut().find(|t| t.id == track_id)
    }
}
