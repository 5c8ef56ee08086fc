//! In-process store. Used by tests and by embedders that persist elsewhere.

use super::subscription::{ChangeCallback, Subscribers, Subscription};
use super::{validate_player_id, PlayerRecord, ProfileStore};
use crate::error::GameError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

type Slot = Arc<tokio::sync::Mutex<PlayerRecord>>;

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Slot>>,
    subscribers: Subscribers,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, player_id: &str) -> Option<Slot> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(player_id)
            .cloned()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn load(&self, player_id: &str) -> Result<Option<PlayerRecord>, GameError> {
        let Some(slot) = self.slot(player_id) else {
            return Ok(None);
        };
        let record = slot.lock().await.clone();
        Ok(Some(record))
    }

    async fn create(&self, record: PlayerRecord) -> Result<(), GameError> {
        validate_player_id(record.player_id())?;
        let player_id = record.player_id().to_string();
        {
            let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
            if records.contains_key(&player_id) {
                return Err(GameError::PlayerExists(player_id));
            }
            records.insert(
                player_id.clone(),
                Arc::new(tokio::sync::Mutex::new(record.clone())),
            );
        }
        self.subscribers.publish(&record.profile);
        Ok(())
    }

    async fn delete(&self, player_id: &str) -> Result<bool, GameError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(player_id)
            .is_some())
    }

    async fn transact<T, F>(&self, player_id: &str, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut PlayerRecord) -> Result<T, GameError> + Send,
        T: Send,
    {
        let slot = self
            .slot(player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))?;

        let mut stored = slot.lock().await;
        let mut working = stored.clone();
        let out = f(&mut working)?;
        if working == *stored {
            return Ok(out);
        }
        *stored = working;
        let profile = stored.profile.clone();
        drop(stored);

        self.subscribers.publish(&profile);
        Ok(out)
    }

    fn subscribe(&self, player_id: &str, on_change: ChangeCallback) -> Subscription {
        self.subscribers.add(player_id, on_change)
    }
}
