//! Day rollover, penalties and daily goal tracks.

use super::Engine;
use crate::core::leveling::{apply_delta, apply_reward, LevelChange};
use crate::daily::logic::{
    create_track, expire_streak, log_track, needs_reset, reset_daily_quests, reset_tracks,
    settle_day,
};
use crate::daily::types::{DailyGoalTrack, DailyResetReport, ResetOutcome, TrackSpec};
use crate::error::GameError;
use crate::guard::daily_reset_key;
use crate::notify::{level_notifications, Notification};
use crate::store::ProfileStore;

impl<S: ProfileStore> Engine<S> {
    /// Closes the previous day if the calendar date has moved on.
    ///
    /// Settles every incomplete daily quest and goal track in one leveling
    /// call, resets them, and stamps today. However many days were missed,
    /// one settlement is applied. Overlapping calls for the same player are
    /// dropped.
    pub async fn check_daily_reset(&self, player_id: &str) -> Result<ResetOutcome, GameError> {
        let Some(_token) = self.guards.try_acquire(daily_reset_key(player_id)) else {
            tracing::debug!("Daily reset for {} already in flight", player_id);
            return Ok(ResetOutcome::InFlight);
        };

        let now = self.clock.now();
        let today = self.clock.calendar_date(now);
        let per_quest_penalty = self.config.daily_quest_penalty();
        let outcome = self
            .store
            .transact(player_id, |record| {
                let last_reset = record.profile.last_daily_reset;
                if !needs_reset(last_reset, today) {
                    return Ok(ResetOutcome::AlreadyCurrent { date: today });
                }
                let Some(previous_reset) = last_reset else {
                    record.profile.last_daily_reset = Some(today);
                    return Ok(ResetOutcome::Initialized { date: today });
                };

                let settlement = settle_day(
                    record.quests.values(),
                    &record.profile.daily_tracks,
                    per_quest_penalty,
                );
                let level_change = apply_reward(&mut record.profile, settlement.net);
                let quests_reset = reset_daily_quests(record.quests.values_mut(), now);
                reset_tracks(&mut record.profile.daily_tracks);
                expire_streak(&mut record.profile, today);
                record.profile.last_daily_reset = Some(today);

                Ok(ResetOutcome::Applied(DailyResetReport {
                    date: today,
                    previous_reset,
                    settlement,
                    level_change,
                    quests_reset,
                    streak: record.profile.streak,
                }))
            })
            .await?;

        match &outcome {
            ResetOutcome::Applied(report) => {
                tracing::info!(
                    "Daily reset for {}: {} incomplete quest(s), net {} exp / {} gold",
                    player_id,
                    report.settlement.incomplete_quests,
                    report.settlement.net.exp,
                    report.settlement.net.gold
                );
                let mut notes = vec![Notification::DailyReset {
                    date: report.date,
                    net: report.settlement.net,
                }];
                notes.extend(level_notifications(&report.level_change));
                self.emit(notes);
            }
            other => tracing::debug!("Daily reset check for {}: {:?}", player_id, other),
        }
        Ok(outcome)
    }

    /// Takes `amount` experience away, leveling down as needed. Gold is
    /// untouched.
    pub async fn apply_penalty(&self, player_id: &str, amount: u64) -> Result<LevelChange, GameError> {
        let delta = i64::try_from(amount).unwrap_or(i64::MAX).saturating_neg();
        let change = self
            .store
            .transact(player_id, |record| Ok(apply_delta(&mut record.profile, delta)))
            .await?;

        tracing::info!("{} penalized {} exp", player_id, amount);
        let mut notes = vec![Notification::PenaltyApplied { exp: amount }];
        notes.extend(level_notifications(&change));
        self.emit(notes);
        Ok(change)
    }

    /// Registers a new per-day goal. Penalties are taken as magnitudes.
    pub async fn add_daily_track(
        &self,
        player_id: &str,
        spec: TrackSpec,
    ) -> Result<DailyGoalTrack, GameError> {
        if spec.id.trim().is_empty() {
            return Err(GameError::Validation("track id must not be empty".into()));
        }
        if spec.target == 0 {
            return Err(GameError::Validation("track target must be positive".into()));
        }
        if spec.reward.exp < 0 || spec.reward.gold < 0 {
            return Err(GameError::Validation("track reward must not be negative".into()));
        }

        let mut track = create_track(spec);
        track.penalty.exp = track.penalty.exp.saturating_abs();
        track.penalty.gold = track.penalty.gold.saturating_abs();

        let stored = track.clone();
        self.store
            .transact(player_id, move |record| {
                if record.profile.track(&stored.id).is_some() {
                    return Err(GameError::Validation(format!(
                        "track already exists: {}",
                        stored.id
                    )));
                }
                record.profile.daily_tracks.push(stored);
                Ok(())
            })
            .await?;
        Ok(track)
    }

    /// Adds to today's count for a goal track.
    pub async fn log_daily_track(
        &self,
        player_id: &str,
        track_id: &str,
        amount: u32,
    ) -> Result<DailyGoalTrack, GameError> {
        self.store
            .transact(player_id, |record| {
                let track = record
                    .profile
                    .track_mut(track_id)
                    .ok_or_else(|| GameError::UnknownTrack(track_id.to_string()))?;
                log_track(track, amount);
                Ok(track.clone())
            })
            .await
    }
}
