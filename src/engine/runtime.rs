//! Background checks driven by the scheduler.

use super::Engine;
use crate::scheduler::Scheduler;
use crate::store::ProfileStore;
use std::sync::Arc;

pub fn daily_reset_timer_id(player_id: &str) -> String {
    format!("daily-reset:{}", player_id)
}

pub fn boss_timeout_timer_id(player_id: &str) -> String {
    format!("boss-timeouts:{}", player_id)
}

/// Starts the daily reset and boss timeout checks for one player.
///
/// Re-installing for the same player replaces the running timers.
pub fn install_timers<S: ProfileStore>(
    scheduler: &mut Scheduler,
    engine: Arc<Engine<S>>,
    player_id: &str,
) {
    let daily_interval = engine.config().daily_check_interval();
    let boss_interval = engine.config().boss_check_interval();

    let (daily_engine, daily_player) = (Arc::clone(&engine), player_id.to_string());
    scheduler.start(daily_reset_timer_id(player_id), daily_interval, move || {
        let engine = Arc::clone(&daily_engine);
        let player_id = daily_player.clone();
        async move {
            if let Err(e) = engine.check_daily_reset(&player_id).await {
                tracing::warn!("Daily reset check for {} failed: {}", player_id, e);
            }
        }
    });

    let boss_player = player_id.to_string();
    scheduler.start(boss_timeout_timer_id(player_id), boss_interval, move || {
        let engine = Arc::clone(&engine);
        let player_id = boss_player.clone();
        async move {
            if let Err(e) = engine.check_boss_timeouts(&player_id).await {
                tracing::warn!("Boss timeout check for {} failed: {}", player_id, e);
            }
        }
    });
}

/// Stops both checks for a player.
pub fn remove_timers(scheduler: &mut Scheduler, player_id: &str) {
    scheduler.stop(&daily_reset_timer_id(player_id));
    scheduler.stop(&boss_timeout_timer_id(player_id));
}
