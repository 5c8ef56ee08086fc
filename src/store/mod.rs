//! Persistence contract for player records.
//!
//! Every mutation goes through [`ProfileStore::transact`]: the closure works
//! on a copy of the stored record, and the copy is committed only when the
//! closure returns `Ok`. Subscribers hear about a player after each commit
//! that changed the record.

pub mod json_file;
pub mod memory;
pub mod subscription;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use subscription::{ChangeCallback, Subscribers, Subscription};

use crate::boss::types::BossBattle;
use crate::core::profile::PlayerProfile;
use crate::error::GameError;
use crate::quests::types::Quest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The persisted document for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub profile: PlayerProfile,
    /// Quest id -> quest
    #[serde(default)]
    pub quests: BTreeMap<String, Quest>,
    /// Boss id -> running battle
    #[serde(default)]
    pub battles: BTreeMap<String, BossBattle>,
}

impl PlayerRecord {
    pub fn new(profile: PlayerProfile) -> Self {
        Self {
            profile,
            quests: BTreeMap::new(),
            battles: BTreeMap::new(),
        }
    }

    pub fn player_id(&self) -> &str {
        &self.profile.player_id
    }

    pub fn quest(&self, quest_id: &str) -> Result<&Quest, GameError> {
        self.quests
            .get(quest_id)
            .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))
    }

    pub fn quest_mut(&mut self, quest_id: &str) -> Result<&mut Quest, GameError> {
        self.quests
            .get_mut(quest_id)
            .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))
    }

    /// Quests ordered by creation time (id breaks ties).
    pub fn quests_by_creation(&self) -> Vec<&Quest> {
        let mut quests: Vec<&Quest> = self.quests.values().collect();
        quests.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        quests
    }

    pub fn battle_mut(&mut self, boss_id: &str) -> Result<&mut BossBattle, GameError> {
        self.battles
            .get_mut(boss_id)
            .ok_or_else(|| GameError::BattleNotFound(boss_id.to_string()))
    }
}

/// Player ids double as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_player_id(player_id: &str) -> Result<(), GameError> {
    let valid = !player_id.is_empty()
        && player_id.len() <= 64
        && player_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GameError::Validation(format!(
            "invalid player id {:?}: use letters, digits, '-' or '_'",
            player_id
        )))
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync + 'static {
    /// Reads the committed record, or `None` if the player does not exist.
    async fn load(&self, player_id: &str) -> Result<Option<PlayerRecord>, GameError>;

    /// Stores a new record. Fails with `PlayerExists` if one is present.
    async fn create(&self, record: PlayerRecord) -> Result<(), GameError>;

    /// Removes a player. Returns false if there was nothing to remove.
    async fn delete(&self, player_id: &str) -> Result<bool, GameError>;

    /// Runs a read-modify-write transaction against one player's record.
    ///
    /// Transactions on the same player are serialized. `f` receives a copy of
    /// the record; on `Ok` the copy replaces the stored record, on `Err`
    /// nothing is written and the error is returned.
    async fn transact<T, F>(&self, player_id: &str, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut PlayerRecord) -> Result<T, GameError> + Send,
        T: Send;

    /// Calls `on_change` with the committed profile after every change to
    /// `player_id`. Dropping the returned handle unsubscribes.
    fn subscribe(&self, player_id: &str, on_change: ChangeCallback) -> Subscription;
}
