//! Boss battle operations.
//!
//! A timeout penalty lands at most once per battle: the in-flight guard drops
//! overlapping callers, and inside the transaction the `penalty_applied` flag
//! is set and the battle deleted in the same commit.

use super::progression::{run_pipeline, ProgressionReport};
use super::Engine;
use crate::boss::logic::{advance, scaled_reward, start_battle};
use crate::boss::types::{BossBattle, BossDefinition, BossTimeout, BossVictory};
use crate::catalog::Catalog;
use crate::core::leveling::{apply_reward, LevelChange};
use crate::error::GameError;
use crate::guard::battle_timeout_key;
use crate::notify::{level_notifications, Notification};
use crate::store::{PlayerRecord, ProfileStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a call to advance a battle did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BattleAdvance {
    InProgress {
        battle: BossBattle,
    },
    Defeated {
        victory: BossVictory,
        progression: ProgressionReport,
    },
    /// The deadline had passed; the timeout path ran instead
    Expired {
        timeout: TimeoutOutcome,
    },
}

/// What a timeout check did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TimeoutOutcome {
    TimedOut {
        timeout: BossTimeout,
        level_change: LevelChange,
    },
    /// Still within the time limit
    NotExpired {
        remaining_secs: i64,
    },
    /// The penalty was already applied; the stale battle was removed
    AlreadyApplied,
    /// Another timeout for this battle is in flight; this call was dropped
    InFlight,
}

enum AdvanceStep {
    Progress(BossBattle),
    Won(BossVictory, ProgressionReport),
    Expired,
}

/// Finishes a won battle. The reward is recomputed from the defeat count as
/// it stands now, not when the battle started.
fn defeat_boss(
    record: &mut PlayerRecord,
    def: &BossDefinition,
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> (BossVictory, ProgressionReport) {
    let profile = &mut record.profile;
    let prior_defeats = profile.defeats_of(def.id);
    let reward = scaled_reward(def, prior_defeats);

    let defeats = prior_defeats.saturating_add(1);
    profile.defeated_bosses.insert(def.id.to_string(), defeats);
    let new_title = def
        .rewards
        .title
        .map(|title| profile.grant_title(title))
        .unwrap_or(false);
    record.battles.remove(def.id);

    let progression = run_pipeline(&mut record.profile, reward, catalog, now);
    let victory = BossVictory {
        boss_id: def.id.to_string(),
        boss_name: def.name.to_string(),
        defeats,
        reward,
        title: def.rewards.title.map(str::to_string),
        new_title,
    };
    (victory, progression)
}

impl<S: ProfileStore> Engine<S> {
    fn boss_def(&self, boss_id: &str) -> Result<&'static BossDefinition, GameError> {
        self.catalog
            .boss(boss_id)
            .ok_or_else(|| GameError::UnknownBoss(boss_id.to_string()))
    }

    /// Opens a battle scaled to the hunter's current defeat count.
    pub async fn start_boss_battle(
        &self,
        player_id: &str,
        boss_id: &str,
    ) -> Result<BossBattle, GameError> {
        let def = self.boss_def(boss_id)?;
        let now = self.clock.now();
        let battle = self
            .store
            .transact(player_id, |record| {
                if record.battles.contains_key(def.id) {
                    return Err(GameError::BattleAlreadyActive(def.id.to_string()));
                }
                let battle = start_battle(def, record.profile.defeats_of(def.id), now);
                record.battles.insert(def.id.to_string(), battle.clone());
                Ok(battle)
            })
            .await?;

        tracing::info!(
            "{} challenged {} (target {}, ends {})",
            player_id,
            def.name,
            battle.target_count,
            battle.end_time
        );
        self.emit(vec![Notification::BossBattleStarted {
            boss_id: battle.boss_id.clone(),
            target_count: battle.target_count,
            end_time: battle.end_time,
        }]);
        Ok(battle)
    }

    /// Adds progress to a running battle, defeating the boss at the target.
    /// A battle past its deadline is timed out instead.
    pub async fn advance_boss_battle(
        &self,
        player_id: &str,
        boss_id: &str,
        amount: u32,
    ) -> Result<BattleAdvance, GameError> {
        let def = self.boss_def(boss_id)?;
        let now = self.clock.now();
        let catalog = &self.catalog;
        let step = self
            .store
            .transact(player_id, |record| {
                let battle = record.battle_mut(def.id)?;
                if battle.is_expired(now) {
                    return Ok(AdvanceStep::Expired);
                }
                if !advance(battle, amount) {
                    return Ok(AdvanceStep::Progress(battle.clone()));
                }
                let (victory, progression) = defeat_boss(record, def, catalog, now);
                Ok(AdvanceStep::Won(victory, progression))
            })
            .await?;

        match step {
            AdvanceStep::Progress(battle) => Ok(BattleAdvance::InProgress { battle }),
            AdvanceStep::Won(victory, progression) => {
                tracing::info!("{} defeated {} ({}x)", player_id, def.name, victory.defeats);
                let mut notes = vec![Notification::BossDefeated {
                    boss_id: victory.boss_id.clone(),
                    reward: victory.reward,
                    title: victory.title.clone(),
                }];
                notes.extend(progression.notifications());
                self.emit(notes);
                Ok(BattleAdvance::Defeated {
                    victory,
                    progression,
                })
            }
            AdvanceStep::Expired => {
                let timeout = self.timeout_boss_battle(player_id, boss_id).await?;
                Ok(BattleAdvance::Expired { timeout })
            }
        }
    }

    /// Applies the timeout penalty to an expired battle and removes it.
    pub async fn timeout_boss_battle(
        &self,
        player_id: &str,
        boss_id: &str,
    ) -> Result<TimeoutOutcome, GameError> {
        let Some(_token) = self
            .guards
            .try_acquire(battle_timeout_key(player_id, boss_id))
        else {
            tracing::debug!("Timeout for {}/{} already in flight", player_id, boss_id);
            return Ok(TimeoutOutcome::InFlight);
        };

        let now = self.clock.now();
        let penalty = self.config.boss_timeout_penalty();
        let outcome = self
            .store
            .transact(player_id, |record| {
                let battle = record.battle_mut(boss_id)?;
                if !battle.is_expired(now) {
                    return Ok(TimeoutOutcome::NotExpired {
                        remaining_secs: battle.remaining_time(now).num_seconds(),
                    });
                }
                if battle.penalty_applied {
                    record.battles.remove(boss_id);
                    return Ok(TimeoutOutcome::AlreadyApplied);
                }
                battle.penalty_applied = true;
                let timeout = BossTimeout {
                    boss_id: battle.boss_id.clone(),
                    penalty,
                    final_count: battle.current_count,
                    target_count: battle.target_count,
                };
                record.battles.remove(boss_id);

                let level_change = apply_reward(&mut record.profile, penalty);
                Ok(TimeoutOutcome::TimedOut {
                    timeout,
                    level_change,
                })
            })
            .await?;

        if let TimeoutOutcome::TimedOut {
            timeout,
            level_change,
        } = &outcome
        {
            tracing::warn!(
                "{} ran out of time against {} ({}/{})",
                player_id,
                boss_id,
                timeout.final_count,
                timeout.target_count
            );
            let mut notes = vec![Notification::BossTimedOut {
                boss_id: timeout.boss_id.clone(),
                penalty: timeout.penalty,
            }];
            notes.extend(level_notifications(level_change));
            self.emit(notes);
        }
        Ok(outcome)
    }

    /// Times out every expired battle. Returns the penalties that landed.
    pub async fn check_boss_timeouts(&self, player_id: &str) -> Result<Vec<BossTimeout>, GameError> {
        let now = self.clock.now();
        let expired: Vec<String> = self
            .record(player_id)
            .await?
            .battles
            .values()
            .filter(|battle| battle.is_expired(now))
            .map(|battle| battle.boss_id.clone())
            .collect();

        let mut timeouts = Vec::new();
        for boss_id in expired {
            match self.timeout_boss_battle(player_id, &boss_id).await {
                Ok(TimeoutOutcome::TimedOut { timeout, .. }) => timeouts.push(timeout),
                Ok(other) => tracing::debug!("Timeout sweep for {}: {:?}", boss_id, other),
                // Removed by a concurrent completion or timeout
                Err(GameError::BattleNotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(timeouts)
    }

    /// Running battles, ordered by boss id.
    pub async fn battles(&self, player_id: &str) -> Result<Vec<BossBattle>, GameError> {
        Ok(self.record(player_id).await?.battles.into_values().collect())
    }

    pub fn bosses(&self) -> &'static [BossDefinition] {
        self.catalog.bosses
    }
}
