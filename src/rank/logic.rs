//! Rank evaluation and advancement.

use super::data::requirement_for;
use super::types::{MetricProgress, Rank, RankMetric, RankProgress, RankRequirement};
use crate::core::profile::PlayerProfile;

fn metric_percent(current: u64, required: u64) -> f64 {
    if required == 0 {
        return 100.0;
    }
    (current as f64 / required as f64 * 100.0).min(100.0)
}

fn metric(metric: RankMetric, current: u64, required: u64) -> MetricProgress {
    MetricProgress {
        metric,
        current,
        required,
        percent: metric_percent(current, required),
    }
}

/// Evaluates progress toward the rank above `profile.rank`.
///
/// Each metric contributes `min(100, current/required*100)`; the overall
/// percentage is their average. At the top rank (or when the table has no
/// entry for the next rank) there is no next rank and progress reads 100%.
pub fn evaluate(profile: &PlayerProfile, table: &[RankRequirement]) -> RankProgress {
    let next = profile.rank.next();
    let requirement = next.and_then(|rank| requirement_for(table, rank));

    let Some(req) = requirement else {
        return RankProgress {
            current: profile.rank,
            next: None,
            metrics: Vec::new(),
            overall_percent: 100.0,
        };
    };

    let metrics = vec![
        metric(RankMetric::Level, profile.level as u64, req.level as u64),
        metric(
            RankMetric::QuestsCompleted,
            profile.quests_completed as u64,
            req.quests_completed as u64,
        ),
        metric(
            RankMetric::AchievementsUnlocked,
            profile.unlocked_count() as u64,
            req.achievements_unlocked as u64,
        ),
    ];
    let overall_percent = metrics.iter().map(|m| m.percent).sum::<f64>() / metrics.len() as f64;

    RankProgress {
        current: profile.rank,
        next: Some(req.rank),
        metrics,
        overall_percent,
    }
}

/// Advances the profile by exactly one tier if the next rank is reached.
///
/// Returns the new rank when an advancement happened. Never skips tiers,
/// however far past the requirement the hunter is.
pub fn try_advance(profile: &mut PlayerProfile, table: &[RankRequirement]) -> Option<Rank> {
    let progress = evaluate(profile, table);
    if !progress.ready() {
        return None;
    }
    let next = progress.next?;
    profile.rank = next;
    Some(next)
}
