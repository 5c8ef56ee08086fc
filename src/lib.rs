//! Hunter - progression engine library
//!
//! Quests, timed boss battles, daily resets, levels, ranks and achievements
//! for a personal progression tracker. The [`engine::Engine`] facade is the
//! entry point; everything underneath is plain rules code over
//! [`crate::core::profile::PlayerProfile`] values.

pub mod achievements;
pub mod boss;
pub mod build_info;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod core;
pub mod daily;
pub mod engine;
pub mod error;
pub mod guard;
pub mod notify;
pub mod quests;
pub mod rank;
pub mod scheduler;
pub mod store;
pub mod utils;

pub use catalog::Catalog;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use crate::core::leveling::{LevelChange, Reward};
pub use crate::core::profile::PlayerProfile;
pub use engine::{Command, CommandResult, Engine};
pub use error::{CatalogError, ErrorKind, GameError, StoreError};
pub use store::{JsonFileStore, MemoryStore, PlayerRecord, ProfileStore};
