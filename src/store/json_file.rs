//! One pretty-printed JSON document per player under a data directory
//! (`~/.hunter/players/<player_id>.json` by default).
//!
//! Every mutation holds an exclusive lock on `<player_id>.json.lock` from
//! read to write, so separate stores over one directory (a `watch` process
//! and a one-shot command, say) never overwrite each other's commits.

use super::subscription::{ChangeCallback, Subscribers, Subscription};
use super::{validate_player_id, PlayerRecord, ProfileStore};
use crate::error::{GameError, StoreError};
use crate::utils::persistence::{lock_exclusive, to_pretty_json, write_atomic, FileLock};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct JsonFileStore {
    dir: PathBuf,
    subscribers: Subscribers,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            subscribers: Subscribers::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, player_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", player_id))
    }

    async fn lock(&self, player_id: &str) -> Result<FileLock, StoreError> {
        lock_exclusive(&self.dir.join(format!("{}.json.lock", player_id))).await
    }

    async fn read(&self, player_id: &str) -> Result<Option<PlayerRecord>, StoreError> {
        match tokio::fs::read_to_string(self.path_for(player_id)).await {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, record: &PlayerRecord) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let json = to_pretty_json(record)?;
        write_atomic(&self.path_for(record.player_id()), &json).await
    }
}

#[async_trait]
impl ProfileStore for JsonFileStore {
    // Writes land by rename, so a reader sees either the old or new file
    async fn load(&self, player_id: &str) -> Result<Option<PlayerRecord>, GameError> {
        validate_player_id(player_id)?;
        Ok(self.read(player_id).await?)
    }

    async fn create(&self, record: PlayerRecord) -> Result<(), GameError> {
        validate_player_id(record.player_id())?;
        let held = self.lock(record.player_id()).await?;

        if self.read(record.player_id()).await?.is_some() {
            return Err(GameError::PlayerExists(record.player_id().to_string()));
        }
        self.write(&record).await?;
        drop(held);
        tracing::debug!("Created {}", self.path_for(record.player_id()).display());

        self.subscribers.publish(&record.profile);
        Ok(())
    }

    async fn delete(&self, player_id: &str) -> Result<bool, GameError> {
        validate_player_id(player_id)?;
        let _held = self.lock(player_id).await?;
        match tokio::fs::remove_file(self.path_for(player_id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::from(e).into()),
        }
    }

    async fn transact<T, F>(&self, player_id: &str, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut PlayerRecord) -> Result<T, GameError> + Send,
        T: Send,
    {
        validate_player_id(player_id)?;
        let held = self.lock(player_id).await?;

        let stored = self
            .read(player_id)
            .await?
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))?;
        let mut working = stored.clone();
        let out = f(&mut working)?;
        if working == stored {
            return Ok(out);
        }
        self.write(&working).await?;
        drop(held);

        self.subscribers.publish(&working.profile);
        Ok(out)
    }

    fn subscribe(&self, player_id: &str, on_change: ChangeCallback) -> Subscription {
        self.subscribers.add(player_id, on_change)
    }
}
