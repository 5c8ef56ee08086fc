//! Error types for engine operations, storage and catalogs.

use serde::{Deserialize, Serialize};

/// Storage failures. Surfaced to callers as [`GameError::Persistence`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine home directory")]
    MissingHomeDir,
}

/// Errors returned by engine operations.
///
/// Every variant is per-operation; the stored profile is left in its last
/// committed state.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Player already exists: {0}")]
    PlayerExists(String),

    #[error("Quest not found: {0}")]
    QuestNotFound(String),

    #[error("No active battle against boss: {0}")]
    BattleNotFound(String),

    #[error("Unknown boss: {0}")]
    UnknownBoss(String),

    #[error("Unknown daily track: {0}")]
    UnknownTrack(String),

    #[error("A battle against {0} is already in progress")]
    BattleAlreadyActive(String),

    #[error("Daily quest already completed today: {0}")]
    AlreadyCompletedToday(String),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

/// Coarse error categories reported to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    AlreadyCompleted,
    Conflict,
    Persistence,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::Validation(_) => ErrorKind::Validation,
            GameError::PlayerNotFound(_)
            | GameError::QuestNotFound(_)
            | GameError::BattleNotFound(_)
            | GameError::UnknownBoss(_)
            | GameError::UnknownTrack(_) => ErrorKind::NotFound,
            GameError::AlreadyCompletedToday(_) => ErrorKind::AlreadyCompleted,
            GameError::PlayerExists(_) | GameError::BattleAlreadyActive(_) => ErrorKind::Conflict,
            GameError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

/// Invalid static catalog data. A programmer error, reported when the
/// engine is built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Boss {0} must have a positive target count and time limit")]
    InvalidBoss(String),

    #[error("Achievement {0} must have at least one rank with strictly increasing requirements")]
    InvalidAchievement(String),

    #[error("Rank table must list every rank above E exactly once, in order")]
    InvalidRankTable,
}
