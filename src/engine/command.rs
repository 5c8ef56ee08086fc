//! Serializable command dispatcher.
//!
//! Collaborators that do not want to deal with Rust error types send a
//! [`Command`] and get back a [`CommandResult`]: `{success, data?, error?}`.

use super::Engine;
use crate::daily::types::TrackSpec;
use crate::error::{ErrorKind, GameError, StoreError};
use crate::quests::types::{ProgressInput, QuestSpec};
use crate::store::ProfileStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    CreatePlayer,
    Profile,
    CreateQuest {
        #[serde(default)]
        spec: QuestSpec,
    },
    UpdateQuestProgress {
        quest_id: String,
        progress: ProgressInput,
    },
    CompleteQuest {
        quest_id: String,
    },
    DeleteQuest {
        quest_id: String,
    },
    ListQuests,
    StartBossBattle {
        boss_id: String,
    },
    AdvanceBossBattle {
        boss_id: String,
        amount: u32,
    },
    TimeoutBossBattle {
        boss_id: String,
    },
    CheckBossTimeouts,
    ListBattles,
    CheckDailyReset,
    ApplyPenalty {
        amount: u64,
    },
    CheckAchievements,
    AchievementProgress,
    CheckRankProgress,
    RankProgress,
    AddDailyTrack {
        track: TrackSpec,
    },
    LogDailyTrack {
        track_id: String,
        amount: u32,
    },
    SetActiveTitle {
        #[serde(default)]
        title: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(err: &GameError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(CommandError {
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }
}

impl<T: Serialize> From<Result<T, GameError>> for CommandResult {
    fn from(result: Result<T, GameError>) -> Self {
        let value = result.and_then(|data| {
            serde_json::to_value(data).map_err(|e| GameError::Persistence(StoreError::Json(e)))
        });
        match value {
            Ok(data) => CommandResult::ok(data),
            Err(err) => CommandResult::failed(&err),
        }
    }
}

impl<S: ProfileStore> Engine<S> {
    /// Runs one command for `player_id`. Never fails: errors come back
    /// inside the result.
    pub async fn execute(&self, player_id: &str, command: Command) -> CommandResult {
        tracing::debug!("Executing {:?} for {}", command, player_id);
        let result: CommandResult = match command {
            Command::CreatePlayer => self.create_player(player_id).await.into(),
            Command::Profile => self.profile(player_id).await.into(),
            Command::CreateQuest { spec } => self.create_quest(player_id, spec).await.into(),
            Command::UpdateQuestProgress { quest_id, progress } => self
                .update_quest_progress(player_id, &quest_id, progress)
                .await
                .into(),
            Command::CompleteQuest { quest_id } => {
                self.complete_quest(player_id, &quest_id).await.into()
            }
            Command::DeleteQuest { quest_id } => self.delete_quest(player_id, &quest_id).await.into(),
            Command::ListQuests => self.quests(player_id).await.into(),
            Command::StartBossBattle { boss_id } => {
                self.start_boss_battle(player_id, &boss_id).await.into()
            }
            Command::AdvanceBossBattle { boss_id, amount } => self
                .advance_boss_battle(player_id, &boss_id, amount)
                .await
                .into(),
            Command::TimeoutBossBattle { boss_id } => {
                self.timeout_boss_battle(player_id, &boss_id).await.into()
            }
            Command::CheckBossTimeouts => self.check_boss_timeouts(player_id).await.into(),
            Command::ListBattles => self.battles(player_id).await.into(),
            Command::CheckDailyReset => self.check_daily_reset(player_id).await.into(),
            Command::ApplyPenalty { amount } => self.apply_penalty(player_id, amount).await.into(),
            Command::CheckAchievements => self.check_achievements(player_id).await.into(),
            Command::AchievementProgress => self.achievement_progress(player_id).await.into(),
            Command::CheckRankProgress => self.check_rank_progress(player_id).await.into(),
            Command::RankProgress => self.rank_progress(player_id).await.into(),
            Command::AddDailyTrack { track } => self.add_daily_track(player_id, track).await.into(),
            Command::LogDailyTrack { track_id, amount } => self
                .log_daily_track(player_id, &track_id, amount)
                .await
                .into(),
            Command::SetActiveTitle { title } => {
                self.set_active_title(player_id, title).await.into()
            }
        };
        if let CommandResult {
            error: Some(error), ..
        } = &result
        {
            tracing::debug!("Command for {} failed: {}", player_id, error.message);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_wire_format() {
        let command: Command = serde_json::from_value(json!({
            "command": "update_quest_progress",
            "quest_id": "q1",
            "progress": { "amount": 3 }
        }))
        .unwrap();
        assert_eq!(
            command,
            Command::UpdateQuestProgress {
                quest_id: "q1".into(),
                progress: ProgressInput::Amount(3),
            }
        );

        let command: Command = serde_json::from_value(json!({
            "command": "update_quest_progress",
            "quest_id": "q1",
            "progress": "complete"
        }))
        .unwrap();
        assert!(matches!(
            command,
            Command::UpdateQuestProgress {
                progress: ProgressInput::Complete,
                ..
            }
        ));
    }

    #[test]
    fn test_create_quest_with_empty_body() {
        let command: Command = serde_json::from_value(json!({ "command": "create_quest" })).unwrap();
        assert_eq!(
            command,
            Command::CreateQuest {
                spec: QuestSpec::default()
            }
        );
    }

    #[test]
    fn test_result_shape() {
        let ok: CommandResult = Ok::<_, GameError>(5).into();
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json, json!({ "success": true, "data": 5 }));

        let failed: CommandResult = Err::<u32, _>(GameError::QuestNotFound("q".into())).into();
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["kind"], "not_found");
        assert!(json.get("data").is_none());
    }
}
