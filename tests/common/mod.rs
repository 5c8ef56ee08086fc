//! Shared test utilities for engine integration tests

use async_trait::async_trait;
use hunter::store::{ChangeCallback, Subscription};
use hunter::{GameError, MemoryStore, PlayerRecord, ProfileStore};

/// A `MemoryStore` whose transactions yield to the scheduler before running,
/// so calls joined on one task genuinely interleave.
#[derive(Default)]
pub struct YieldingStore {
    inner: MemoryStore,
}

#[async_trait]
impl ProfileStore for YieldingStore {
    async fn load(&self, player_id: &str) -> Result<Option<PlayerRecord>, GameError> {
        self.inner.load(player_id).await
    }

    async fn create(&self, record: PlayerRecord) -> Result<(), GameError> {
        self.inner.create(record).await
    }

    async fn delete(&self, player_id: &str) -> Result<bool, GameError> {
        self.inner.delete(player_id).await
    }

    async fn transact<T, F>(&self, player_id: &str, f: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut PlayerRecord) -> Result<T, GameError> + Send,
        T: Send,
    {
        tokio::task::yield_now().await;
        self.inner.transact(player_id, f).await
    }

    fn subscribe(&self, player_id: &str, on_change: ChangeCallback) -> Subscription {
        self.inner.subscribe(player_id, on_change)
    }
}
