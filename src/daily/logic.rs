use super::types::{DailyGoalTrack, DailySettlement, TrackOutcome, TrackSpec};
use crate::core::leveling::Reward;
use crate::core::profile::PlayerProfile;
use crate::quests::logic::reset_daily;
use crate::quests::types::Quest;
use chrono::{DateTime, NaiveDate, Utc};

/// A reset is due whenever the stored reset date differs from today.
///
/// Several missed days still produce a single reset.
pub fn needs_reset(last_reset: Option<NaiveDate>, today: NaiveDate) -> bool {
    last_reset != Some(today)
}

/// Computes the net adjustment for the day being closed.
///
/// `per_quest_penalty` is applied once per daily quest that is not completed.
/// Tracks contribute their reward when met and their penalty when missed.
pub fn settle_day<'a>(
    quests: impl IntoIterator<Item = &'a Quest>,
    tracks: &[DailyGoalTrack],
    per_quest_penalty: Reward,
) -> DailySettlement {
    let incomplete_quests = quests
        .into_iter()
        .filter(|q| q.is_daily() && !q.completed)
        .count() as u32;

    let quest_penalty = Reward::new(
        per_quest_penalty.exp.saturating_mul(incomplete_quests as i64),
        per_quest_penalty.gold.saturating_mul(incomplete_quests as i64),
    );

    let track_outcomes: Vec<TrackOutcome> = tracks
        .iter()
        .map(|track| {
            let met = track.is_met();
            TrackOutcome {
                track_id: track.id.clone(),
                current: track.current,
                target: track.target,
                met,
                delta: if met { track.reward } else { -track.penalty },
            }
        })
        .collect();

    let net = quest_penalty + track_outcomes.iter().map(|o| o.delta).sum::<Reward>();

    DailySettlement {
        incomplete_quests,
        quest_penalty,
        track_outcomes,
        net,
    }
}

/// Resets every daily quest. Returns how many were reset.
pub fn reset_daily_quests<'a>(
    quests: impl IntoIterator<Item = &'a mut Quest>,
    now: DateTime<Utc>,
) -> usize {
    let mut count = 0;
    for quest in quests.into_iter().filter(|q| q.is_daily()) {
        reset_daily(quest, now);
        count += 1;
    }
    count
}

pub fn reset_tracks(tracks: &mut [DailyGoalTrack]) {
    for track in tracks {
        track.current = 0;
    }
}

/// Drops the streak when no daily quest was completed yesterday or today.
pub fn expire_streak(profile: &mut PlayerProfile, today: NaiveDate) {
    let yesterday = today.pred_opt();
    let alive = match profile.last_streak_date {
        Some(last) => last == today || Some(last) == yesterday,
        None => false,
    };
    if !alive {
        profile.streak = 0;
    }
}

/// Builds a track from user input. The unit defaults to "times".
pub fn create_track(spec: TrackSpec) -> DailyGoalTrack {
    DailyGoalTrack {
        id: spec.id,
        name: spec.name,
        unit: spec
            .unit
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| "times".to_string()),
        target: spec.target,
        current: 0,
        reward: spec.reward,
        penalty: spec.penalty,
    }
}

/// Adds to a track's count for today.
pub fn log_track(track: &mut DailyGoalTrack, amount: u32) -> u32 {
    track.current = track.current.saturating_add(amount);
    track.current
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quests::logic::{create_quest, mark_completed};
    use crate::quests::types::{QuestKind, QuestSpec};

    fn daily(now: DateTime<Utc>) -> Quest {
        create_quest(
            QuestSpec {
                kind: QuestKind::Daily,
                ..Default::default()
            },
            now,
        )
    }

    fn water(current: u32) -> DailyGoalTrack {
        DailyGoalTrack {
            id: "water".into(),
            name: "Water".into(),
            unit: "glasses".into(),
            target: 8,
            current,
            reward: Reward::new(20, 5),
            penalty: Reward::new(30, 0),
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, day).unwrap()
    }

    #[test]
    fn test_needs_reset() {
        assert!(needs_reset(None, date(1)));
        assert!(needs_reset(Some(date(1)), date(2)));
        assert!(needs_reset(Some(date(1)), date(9)));
        assert!(!needs_reset(Some(date(2)), date(2)));
    }

    #[test]
    fn test_settle_counts_only_incomplete_daily_quests() {
        let now = Utc::now();
        let mut done = daily(now);
        mark_completed(&mut done, now);
        let open_a = daily(now);
        let open_b = daily(now);
        let normal = create_quest(QuestSpec::default(), now);

        let settlement = settle_day(
            [&done, &open_a, &open_b, &normal],
            &[],
            Reward::penalty(50, 0),
        );
        assert_eq!(settlement.incomplete_quests, 2);
        assert_eq!(settlement.quest_penalty, Reward::new(-100, 0));
        assert_eq!(settlement.net, Reward::new(-100, 0));
    }

    #[test]
    fn test_settle_tracks() {
        let settlement = settle_day(
            std::iter::empty(),
            &[water(8), water(3)],
            Reward::penalty(50, 0),
        );
        assert!(settlement.track_outcomes[0].met);
        assert_eq!(settlement.track_outcomes[0].delta, Reward::new(20, 5));
        assert!(!settlement.track_outcomes[1].met);
        assert_eq!(settlement.track_outcomes[1].delta, Reward::new(-30, 0));
        assert_eq!(settlement.net, Reward::new(-10, 5));
    }

    #[test]
    fn test_reset_daily_quests_only_touches_daily() {
        let now = Utc::now();
        let mut d = daily(now);
        mark_completed(&mut d, now);
        let mut n = create_quest(QuestSpec::default(), now);
        n.current_count = 3;

        let reset = reset_daily_quests([&mut d, &mut n], now);
        assert_eq!(reset, 1);
        assert!(!d.completed);
        assert_eq!(d.current_count, 0);
        assert_eq!(n.current_count, 3);
    }

    #[test]
    fn test_expire_streak() {
        let mut profile = PlayerProfile::new("streak", Utc::now());
        profile.streak = 4;
        profile.last_streak_date = Some(date(9));
        expire_streak(&mut profile, date(10));
        assert_eq!(profile.streak, 4);

        expire_streak(&mut profile, date(12));
        assert_eq!(profile.streak, 0);
    }

    #[test]
    fn test_tracks() {
        let mut track = create_track(TrackSpec {
            id: "steps".into(),
            name: "Steps".into(),
            unit: None,
            target: 3,
            reward: Reward::ZERO,
            penalty: Reward::new(10, 0),
        });
        assert_eq!(track.unit, "times");
        assert_eq!(log_track(&mut track, 2), 2);
        assert!(!track.is_met());
        log_track(&mut track, 1);
        assert!(track.is_met());

        let mut tracks = vec![track];
        reset_tracks(&mut tracks);
        assert_eq!(tracks[0].current, 0);
    }
}
