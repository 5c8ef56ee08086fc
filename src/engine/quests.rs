//! Quest operations.

use super::progression::{run_pipeline, ProgressionReport};
use super::Engine;
use crate::catalog::Catalog;
use crate::core::leveling::Reward;
use crate::error::GameError;
use crate::notify::Notification;
use crate::quests::logic::{
    completed_on, create_quest, flat_reward, mark_completed, record_daily_completion,
    scaled_reward, update_progress,
};
use crate::quests::types::{ProgressInput, ProgressOutcome, Quest, QuestSpec};
use crate::store::{PlayerRecord, ProfileStore};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Result of a progress update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestUpdate {
    /// The quest as it stands after the update (normal quests that completed
    /// are no longer stored)
    pub quest: Quest,
    pub outcome: ProgressOutcome,
    pub progression: Option<ProgressionReport>,
}

/// Result of a direct completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCompletion {
    pub quest: Quest,
    pub progression: ProgressionReport,
}

/// Books a completed quest: counters, streak, removal of normal quests, then
/// the progression pipeline.
fn settle_completion(
    record: &mut PlayerRecord,
    quest: &Quest,
    reward: Reward,
    catalog: &Catalog,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ProgressionReport {
    if quest.is_daily() {
        record_daily_completion(&mut record.profile, today);
    } else {
        record.quests.remove(&quest.id);
    }
    record.profile.quests_completed = record.profile.quests_completed.saturating_add(1);
    run_pipeline(&mut record.profile, reward, catalog, now)
}

fn completion_notifications(quest: &Quest, report: &ProgressionReport) -> Vec<Notification> {
    let mut notes = vec![Notification::QuestCompleted {
        quest_id: quest.id.clone(),
        title: quest.title.clone(),
        reward: report.reward,
    }];
    notes.extend(report.notifications());
    notes
}

impl<S: ProfileStore> Engine<S> {
    pub async fn create_quest(&self, player_id: &str, spec: QuestSpec) -> Result<Quest, GameError> {
        let quest = create_quest(spec, self.clock.now());
        let stored = quest.clone();
        self.store
            .transact(player_id, move |record| {
                record.quests.insert(stored.id.clone(), stored);
                Ok(())
            })
            .await?;

        tracing::debug!("Created {} quest {} for {}", quest.kind.name(), quest.id, player_id);
        self.emit(vec![Notification::QuestCreated {
            quest_id: quest.id.clone(),
            title: quest.title.clone(),
        }]);
        Ok(quest)
    }

    /// Moves a quest's counter. Reaching the target grants the flat reward
    /// for the quest's kind.
    pub async fn update_quest_progress(
        &self,
        player_id: &str,
        quest_id: &str,
        input: ProgressInput,
    ) -> Result<QuestUpdate, GameError> {
        let clock = self.clock.as_ref();
        let catalog = &self.catalog;
        let update = self
            .store
            .transact(player_id, |record| {
                let quest = record.quest_mut(quest_id)?;
                let outcome = update_progress(quest, input, clock)?;
                let quest = quest.clone();

                let progression = outcome.completed.then(|| {
                    let now = clock.now();
                    settle_completion(
                        record,
                        &quest,
                        flat_reward(quest.kind),
                        catalog,
                        clock.calendar_date(now),
                        now,
                    )
                });
                Ok(QuestUpdate {
                    quest,
                    outcome,
                    progression,
                })
            })
            .await?;

        if let Some(report) = &update.progression {
            tracing::info!("{} completed quest {:?}", player_id, update.quest.title);
            self.emit(completion_notifications(&update.quest, report));
        }
        Ok(update)
    }

    /// Completes a quest outright, granting the reward scaled by its target.
    pub async fn complete_quest(
        &self,
        player_id: &str,
        quest_id: &str,
    ) -> Result<QuestCompletion, GameError> {
        let clock = self.clock.as_ref();
        let catalog = &self.catalog;
        let completion = self
            .store
            .transact(player_id, |record| {
                let now = clock.now();
                let today = clock.calendar_date(now);
                let quest = record.quest_mut(quest_id)?;
                if completed_on(quest, today, clock) {
                    return Err(GameError::AlreadyCompletedToday(quest_id.to_string()));
                }
                mark_completed(quest, now);
                let quest = quest.clone();

                let progression = settle_completion(
                    record,
                    &quest,
                    scaled_reward(quest.target_count),
                    catalog,
                    today,
                    now,
                );
                Ok(QuestCompletion { quest, progression })
            })
            .await?;

        tracing::info!("{} completed quest {:?}", player_id, completion.quest.title);
        self.emit(completion_notifications(&completion.quest, &completion.progression));
        Ok(completion)
    }

    /// Removes a quest without any reward.
    pub async fn delete_quest(&self, player_id: &str, quest_id: &str) -> Result<Quest, GameError> {
        let removed = self
            .store
            .transact(player_id, |record| {
                record
                    .quests
                    .remove(quest_id)
                    .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))
            })
            .await?;

        self.emit(vec![Notification::QuestDeleted {
            quest_id: removed.id.clone(),
        }]);
        Ok(removed)
    }

    /// Every stored quest, oldest first.
    pub async fn quests(&self, player_id: &str) -> Result<Vec<Quest>, GameError> {
        let record = self.record(player_id).await?;
        Ok(record.quests_by_creation().into_iter().cloned().collect())
    }
}
