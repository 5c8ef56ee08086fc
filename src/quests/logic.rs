use super::types::{ProgressInput, ProgressOutcome, Quest, QuestKind, QuestSpec};
use crate::clock::Clock;
use crate::core::constants::*;
use crate::core::leveling::Reward;
use crate::core::profile::PlayerProfile;
use crate::error::GameError;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Normalizes a requested target count. Missing, zero, negative or
/// oversized values recover to the default of 5.
pub fn normalize_target(raw: Option<i64>) -> u32 {
    match raw {
        Some(n) if n > 0 && n <= u32::MAX as i64 => n as u32,
        _ => DEFAULT_QUEST_TARGET,
    }
}

/// Parses a target count typed by a user. Anything non-numeric becomes `None`
/// and later recovers to the default.
pub fn parse_target_count(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Builds a new quest from user input, filling in defaults.
pub fn create_quest(spec: QuestSpec, now: DateTime<Utc>) -> Quest {
    let daily = spec.kind == QuestKind::Daily;
    Quest {
        id: Uuid::new_v4().to_string(),
        title: non_blank(spec.title, DEFAULT_QUEST_TITLE),
        description: non_blank(spec.description, DEFAULT_QUEST_DESCRIPTION),
        metric: non_blank(spec.metric, DEFAULT_QUEST_METRIC),
        target_count: normalize_target(spec.target_count),
        current_count: 0,
        kind: spec.kind,
        completed: false,
        created_at: now,
        last_completion: None,
        last_reset: daily.then_some(now),
    }
}

/// True when a daily quest was already completed on `today`'s calendar date.
pub fn completed_on(quest: &Quest, today: NaiveDate, clock: &dyn Clock) -> bool {
    quest.is_daily()
        && quest.completed
        && quest
            .last_completion
            .map(|at| clock.calendar_date(at) == today)
            .unwrap_or(false)
}

/// Moves a quest's counter, completing it when the target is reached.
///
/// Daily quests already completed today are rejected without change.
/// Progress never exceeds the target.
pub fn update_progress(
    quest: &mut Quest,
    input: ProgressInput,
    clock: &dyn Clock,
) -> Result<ProgressOutcome, GameError> {
    let now = clock.now();
    if completed_on(quest, clock.calendar_date(now), clock) {
        return Err(GameError::AlreadyCompletedToday(quest.id.clone()));
    }

    let previous_count = quest.current_count;
    let new_count = match input {
        ProgressInput::Complete => quest.target_count,
        ProgressInput::Amount(amount) => quest
            .current_count
            .saturating_add(amount)
            .min(quest.target_count),
    };
    quest.current_count = new_count;

    let completed = new_count >= quest.target_count;
    if completed {
        mark_completed(quest, now);
    }

    Ok(ProgressOutcome {
        previous_count,
        new_count,
        completed,
    })
}

pub fn mark_completed(quest: &mut Quest, now: DateTime<Utc>) {
    quest.current_count = quest.target_count;
    quest.completed = true;
    if quest.is_daily() {
        quest.last_completion = Some(now);
    }
}

/// Flat reward granted when progress updates reach the target.
pub fn flat_reward(kind: QuestKind) -> Reward {
    match kind {
        QuestKind::Daily => Reward::new(DAILY_QUEST_REWARD_EXP, DAILY_QUEST_REWARD_GOLD),
        QuestKind::Normal => Reward::new(NORMAL_QUEST_REWARD_EXP, NORMAL_QUEST_REWARD_GOLD),
    }
}

/// Reward granted by direct completion, proportional to the target.
pub fn scaled_reward(target_count: u32) -> Reward {
    let target = target_count as i64;
    Reward::new(
        target * COMPLETION_EXP_PER_TARGET,
        target * COMPLETION_GOLD_PER_TARGET,
    )
}

/// Clears a daily quest for a new day.
pub fn reset_daily(quest: &mut Quest, now: DateTime<Utc>) {
    quest.current_count = 0;
    quest.completed = false;
    quest.last_reset = Some(now);
}

/// Updates the streak after a daily quest is completed on `today`.
///
/// Same day: unchanged. Day after the last completion: +1. Otherwise the
/// streak restarts at 1.
pub fn record_daily_completion(profile: &mut PlayerProfile, today: NaiveDate) {
    match profile.last_streak_date {
        Some(last) if last == today => {}
        Some(last) if last.succ_opt() == Some(today) => profile.streak += 1,
        _ => profile.streak = 1,
    }
    profile.last_streak_date = Some(today);
}
