//! The engine facade.
//!
//! Owns the store, clock, notification sink, catalogs, config and in-flight
//! guards, and exposes every player-facing operation. Each mutation runs as
//! one store transaction; notifications go out only after the commit.

pub mod bosses;
pub mod command;
pub mod daily;
pub mod progression;
pub mod quests;
pub mod runtime;

pub use bosses::{BattleAdvance, TimeoutOutcome};
pub use command::{Command, CommandError, CommandResult};
pub use progression::{run_pipeline, ProgressionReport, RankCheck};
pub use quests::{QuestCompletion, QuestUpdate};
pub use runtime::install_timers;

use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::core::profile::PlayerProfile;
use crate::error::{CatalogError, GameError};
use crate::guard::GuardSet;
use crate::notify::{Notification, NotificationSink, TracingSink};
use crate::store::{validate_player_id, PlayerRecord, ProfileStore};
use std::sync::Arc;

pub struct Engine<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn NotificationSink>,
    catalog: Catalog,
    config: EngineConfig,
    guards: GuardSet,
}

impl<S: ProfileStore> Engine<S> {
    /// Builds an engine, validating the catalog first.
    pub fn new(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn NotificationSink>,
        catalog: Catalog,
        config: EngineConfig,
    ) -> Result<Self, CatalogError> {
        catalog.validate()?;
        Ok(Self {
            store,
            clock,
            sink,
            catalog,
            config,
            guards: GuardSet::new(),
        })
    }

    /// Wall clock, tracing notifications, built-in catalog, default config.
    pub fn with_defaults(store: Arc<S>) -> Result<Self, CatalogError> {
        Self::new(
            store,
            Arc::new(SystemClock),
            Arc::new(TracingSink),
            Catalog::builtin(),
            EngineConfig::default(),
        )
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn emit(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            self.sink.notify(notification);
        }
    }

    async fn record(&self, player_id: &str) -> Result<PlayerRecord, GameError> {
        self.store
            .load(player_id)
            .await?
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))
    }

    /// Creates a level 1 E-rank hunter. The daily reset date starts at today
    /// so the first day carries no penalty.
    pub async fn create_player(&self, player_id: &str) -> Result<PlayerProfile, GameError> {
        validate_player_id(player_id)?;
        let mut profile = PlayerProfile::new(player_id, self.clock.now());
        profile.last_daily_reset = Some(self.clock.today());

        self.store.create(PlayerRecord::new(profile.clone())).await?;
        tracing::info!("Created hunter {}", player_id);
        Ok(profile)
    }

    pub async fn profile(&self, player_id: &str) -> Result<PlayerProfile, GameError> {
        Ok(self.record(player_id).await?.profile)
    }
}
