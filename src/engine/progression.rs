//! The completion pipeline: reward, rank, one achievement pass, one summed
//! achievement reward, one rank re-evaluation.
//!
//! The achievement/rank feedback is bounded to that single extra pass. Any
//! achievement that becomes reachable through the second round of changes
//! is picked up by the next completion or an explicit check.

use super::Engine;
use crate::achievements::logic::{apply_pass, evaluate_pass, progress_report};
use crate::achievements::types::{AchievementPass, AchievementStatus};
use crate::catalog::Catalog;
use crate::core::leveling::{apply_reward, LevelChange, Reward};
use crate::core::profile::PlayerProfile;
use crate::error::GameError;
use crate::notify::{level_notifications, Notification};
use crate::rank::logic::{evaluate, try_advance};
use crate::rank::types::{Rank, RankProgress};
use crate::store::ProfileStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionReport {
    /// The reward that started the pipeline
    pub reward: Reward,
    pub level_change: LevelChange,
    pub achievements: AchievementPass,
    /// Leveling call for the summed achievement reward, when one was made
    #[serde(default)]
    pub achievement_level_change: Option<LevelChange>,
    /// At most two: one after the reward, one after the achievement pass
    #[serde(default)]
    pub rank_ups: Vec<Rank>,
}

impl ProgressionReport {
    pub fn total_reward(&self) -> Reward {
        self.reward + self.achievements.total_reward
    }

    pub fn final_level(&self) -> u32 {
        self.achievement_level_change
            .as_ref()
            .unwrap_or(&self.level_change)
            .level_after
    }

    pub fn notifications(&self) -> Vec<Notification> {
        let mut out = level_notifications(&self.level_change);
        for advance in &self.achievements.advances {
            out.push(Notification::AchievementUnlocked {
                id: advance.id.clone(),
                name: advance.name.clone(),
                rank: advance.new_rank,
            });
        }
        if let Some(change) = &self.achievement_level_change {
            out.extend(level_notifications(change));
        }
        out.extend(self.rank_ups.iter().map(|&rank| Notification::RankUp { rank }));
        out
    }
}

/// Applies `reward` to the profile and runs the bounded follow-up passes.
pub fn run_pipeline(
    profile: &mut PlayerProfile,
    reward: Reward,
    catalog: &Catalog,
    now: DateTime<Utc>,
) -> ProgressionReport {
    let level_change = apply_reward(profile, reward);

    let mut rank_ups = Vec::new();
    rank_ups.extend(try_advance(profile, catalog.ranks));

    let achievements = evaluate_pass(profile, catalog.achievements);
    let mut achievement_level_change = None;
    if !achievements.is_empty() {
        apply_pass(profile, &achievements, now);
        achievement_level_change = Some(apply_reward(profile, achievements.total_reward));
        rank_ups.extend(try_advance(profile, catalog.ranks));
    }

    ProgressionReport {
        reward,
        level_change,
        achievements,
        achievement_level_change,
        rank_ups,
    }
}

/// Outcome of an explicit rank check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankCheck {
    pub advanced_to: Option<Rank>,
    pub progress: RankProgress,
}

impl<S: ProfileStore> Engine<S> {
    /// Runs one achievement pass (and its summed reward and rank
    /// re-evaluation) outside any completion event.
    pub async fn check_achievements(&self, player_id: &str) -> Result<ProgressionReport, GameError> {
        let now = self.clock.now();
        let catalog = &self.catalog;
        let report = self
            .store
            .transact(player_id, |record| {
                Ok(run_pipeline(&mut record.profile, Reward::ZERO, catalog, now))
            })
            .await?;

        if !report.achievements.is_empty() {
            tracing::info!(
                "{} achievement rank(s) reached by {}",
                report.achievements.advances.len(),
                player_id
            );
        }
        self.emit(report.notifications());
        Ok(report)
    }

    /// Advances the rank by at most one tier and reports progress toward the
    /// next one.
    pub async fn check_rank_progress(&self, player_id: &str) -> Result<RankCheck, GameError> {
        let ranks = self.catalog.ranks;
        let check = self
            .store
            .transact(player_id, |record| {
                let advanced_to = try_advance(&mut record.profile, ranks);
                Ok(RankCheck {
                    advanced_to,
                    progress: evaluate(&record.profile, ranks),
                })
            })
            .await?;

        if let Some(rank) = check.advanced_to {
            tracing::info!("{} advanced to {}", player_id, rank);
            self.emit(vec![Notification::RankUp { rank }]);
        }
        Ok(check)
    }

    /// Read-only progress on every achievement. Nothing is granted.
    pub async fn achievement_progress(
        &self,
        player_id: &str,
    ) -> Result<Vec<AchievementStatus>, GameError> {
        let profile = self.profile(player_id).await?;
        Ok(progress_report(&profile, self.catalog.achievements))
    }

    /// Read-only rank projection. Never advances the rank.
    pub async fn rank_progress(&self, player_id: &str) -> Result<RankProgress, GameError> {
        let profile = self.profile(player_id).await?;
        Ok(evaluate(&profile, self.catalog.ranks))
    }

    /// Chooses which earned title is shown. `None` clears it.
    pub async fn set_active_title(
        &self,
        player_id: &str,
        title: Option<String>,
    ) -> Result<PlayerProfile, GameError> {
        self.store
            .transact(player_id, |record| {
                if let Some(title) = &title {
                    if !record.profile.titles.contains(title) {
                        return Err(GameError::Validation(format!(
                            "title not earned: {}",
                            title
                        )));
                    }
                }
                record.profile.active_title = title;
                Ok(record.profile.clone())
            })
            .await
    }
}
