//! Achievement evaluation.
//!
//! A pass looks at every achievement's next rank against the profile as it
//! stands, before any of the pass's own rewards are applied. Applying the
//! summed reward is the caller's job so it happens in one leveling call.

use super::types::{AchievementAdvance, AchievementDef, AchievementPass, AchievementStatus};
use crate::core::profile::PlayerProfile;
use chrono::{DateTime, Utc};

/// Evaluates every definition once and collects the ranks that were reached.
///
/// At most one rank per achievement per pass. The profile is not modified.
pub fn evaluate_pass(profile: &PlayerProfile, defs: &[AchievementDef]) -> AchievementPass {
    let mut pass = AchievementPass::default();

    for def in defs {
        let current_rank = profile.achievement_rank(def.id);
        let Some(next) = def.rank(current_rank + 1) else {
            continue;
        };
        if def.metric.current_value(profile) < next.requirement {
            continue;
        }
        pass.total_reward += next.reward;
        pass.advances.push(AchievementAdvance {
            id: def.id.to_string(),
            name: def.name.to_string(),
            new_rank: current_rank + 1,
            first_unlock: current_rank == 0,
            reward: next.reward,
        });
    }

    pass
}

/// Records a pass's rank increments and first unlocks on the profile.
///
/// Rewards are not applied here.
pub fn apply_pass(profile: &mut PlayerProfile, pass: &AchievementPass, now: DateTime<Utc>) {
    for advance in &pass.advances {
        let record = profile
            .achievements
            .entry(advance.id.clone())
            .or_default();
        record.current_rank = advance.new_rank;
        record.last_advanced_at = Some(now);

        if advance.first_unlock {
            profile.unlocked_achievements.insert(advance.id.clone());
        }
    }
}

/// (current value, requirement of the next rank), or `None` when maxed.
pub fn next_rank_progress(profile: &PlayerProfile, def: &AchievementDef) -> Option<(u64, u64)> {
    let next = def.rank(profile.achievement_rank(def.id) + 1)?;
    Some((def.metric.current_value(profile), next.requirement))
}

/// Progress on every definition, in catalog order.
pub fn progress_report(profile: &PlayerProfile, defs: &[AchievementDef]) -> Vec<AchievementStatus> {
    defs.iter()
        .map(|def| AchievementStatus {
            id: def.id.to_string(),
            name: def.name.to_string(),
            metric: def.metric,
            current_rank: profile.achievement_rank(def.id),
            max_rank: def.max_rank(),
            current_value: def.metric.current_value(profile),
            next_requirement: next_rank_progress(profile, def).map(|(_, requirement)| requirement),
        })
        .collect()
}
