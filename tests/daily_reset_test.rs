//! Integration test: daily reset
//!
//! Calendar-day rollover, the single net settlement, idempotence within a
//! day and under concurrent triggers, offline gaps and goal tracks.

mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::YieldingStore;
use hunter::core::experience::total_exp;
use hunter::daily::types::{ResetOutcome, TrackSpec};
use hunter::engine::Engine;
use hunter::notify::NullSink;
use hunter::quests::types::{ProgressInput, QuestKind, QuestSpec};
use hunter::{
    Catalog, Clock, EngineConfig, ManualClock, MemoryStore, PlayerProfile, PlayerRecord,
    ProfileStore, Reward,
};
use std::sync::Arc;

const PLAYER: &str = "chaeinha";

fn day_one() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 20, 0, 0).unwrap()
}

async fn setup() -> (Engine<MemoryStore>, Arc<ManualClock>) {
    setup_with(MemoryStore::new()).await
}

async fn setup_with<S: ProfileStore>(store: S) -> (Engine<S>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(day_one()));
    let engine = Engine::new(
        Arc::new(store),
        clock.clone(),
        Arc::new(NullSink),
        Catalog::builtin(),
        EngineConfig::default(),
    )
    .unwrap();
    engine.create_player(PLAYER).await.unwrap();
    (engine, clock)
}

fn daily_spec() -> QuestSpec {
    QuestSpec {
        kind: QuestKind::Daily,
        target_count: Some(3),
        ..QuestSpec::default()
    }
}

/// Gives the hunter enough experience that penalties are not clamped.
async fn grant_exp<S: ProfileStore>(engine: &Engine<S>, level: u32, exp: u64) {
    engine
        .store()
        .transact(PLAYER, |record| {
            record.profile.level = level;
            record.profile.exp = exp;
            record.profile.exp_needed = hunter::core::experience::exp_needed(level);
            Ok(())
        })
        .await
        .unwrap();
}

fn lifetime_exp(profile: &PlayerProfile) -> u64 {
    total_exp(profile.level, profile.exp)
}

#[tokio::test]
async fn test_same_day_is_a_no_op() {
    let (engine, _) = setup().await;
    engine.create_quest(PLAYER, daily_spec()).await.unwrap();

    let outcome = engine.check_daily_reset(PLAYER).await.unwrap();
    assert_eq!(
        outcome,
        ResetOutcome::AlreadyCurrent {
            date: day_one().date_naive()
        }
    );
}

#[tokio::test]
async fn test_reset_runs_once_per_day() {
    let (engine, clock) = setup().await;
    grant_exp(&engine, 5, 30).await;
    engine.create_quest(PLAYER, daily_spec()).await.unwrap();
    engine.create_quest(PLAYER, daily_spec()).await.unwrap();

    // Just past midnight counts as a new day
    clock.advance(Duration::hours(4));
    let before = engine.profile(PLAYER).await.unwrap();

    let mut applied = 0;
    for _ in 0..5 {
        match engine.check_daily_reset(PLAYER).await.unwrap() {
            ResetOutcome::Applied(report) => {
                applied += 1;
                assert_eq!(report.settlement.incomplete_quests, 2);
                assert_eq!(report.settlement.net, Reward::new(-100, 0));
                assert_eq!(report.quests_reset, 2);
                assert_eq!(report.previous_reset, day_one().date_naive());
            }
            ResetOutcome::AlreadyCurrent { date } => assert_eq!(date, clock.today()),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
    assert_eq!(applied, 1);

    let after = engine.profile(PLAYER).await.unwrap();
    assert_eq!(lifetime_exp(&before) - lifetime_exp(&after), 100);
    assert_eq!(after.last_daily_reset, Some(clock.today()));
}

#[tokio::test]
async fn test_concurrent_triggers_settle_once() {
    let (engine, clock) = setup_with(YieldingStore::default()).await;
    grant_exp(&engine, 10, 0).await;
    engine.create_quest(PLAYER, daily_spec()).await.unwrap();
    clock.advance(Duration::days(1));
    let before = engine.profile(PLAYER).await.unwrap();

    let (a, b, c) = tokio::join!(
        engine.check_daily_reset(PLAYER),
        engine.check_daily_reset(PLAYER),
        engine.check_daily_reset(PLAYER)
    );
    let outcomes = [a.unwrap(), b.unwrap(), c.unwrap()];
    let applied = outcomes
        .iter()
        .filter(|o| matches!(o, ResetOutcome::Applied(_)))
        .count();
    let in_flight = outcomes
        .iter()
        .filter(|o| matches!(o, ResetOutcome::InFlight))
        .count();
    assert_eq!((applied, in_flight), (1, 2), "outcomes: {:?}", outcomes);

    let after = engine.profile(PLAYER).await.unwrap();
    assert_eq!(lifetime_exp(&before) - lifetime_exp(&after), 50);

    // The guard is released once the winner commits
    assert!(matches!(
        engine.check_daily_reset(PLAYER).await.unwrap(),
        ResetOutcome::AlreadyCurrent { .. }
    ));
}

#[tokio::test]
async fn test_offline_gap_applies_one_cycle() {
    let (engine, clock) = setup().await;
    grant_exp(&engine, 10, 0).await;
    engine.create_quest(PLAYER, daily_spec()).await.unwrap();
    clock.advance(Duration::days(6));

    let ResetOutcome::Applied(report) = engine.check_daily_reset(PLAYER).await.unwrap() else {
        panic!("expected a reset");
    };
    assert_eq!(report.settlement.incomplete_quests, 1);
    assert_eq!(report.settlement.net, Reward::new(-50, 0));
    assert_eq!(report.date, clock.today());
}

#[tokio::test]
async fn test_reset_clears_daily_quests() {
    let (engine, clock) = setup().await;
    let done = engine.create_quest(PLAYER, daily_spec()).await.unwrap();
    let partial = engine.create_quest(PLAYER, daily_spec()).await.unwrap();
    let normal = engine
        .create_quest(
            PLAYER,
            QuestSpec {
                target_count: Some(10),
                ..QuestSpec::default()
            },
        )
        .await
        .unwrap();

    engine
        .update_quest_progress(PLAYER, &done.id, ProgressInput::Complete)
        .await
        .unwrap();
    engine
        .update_quest_progress(PLAYER, &partial.id, ProgressInput::Amount(1))
        .await
        .unwrap();
    engine
        .update_quest_progress(PLAYER, &normal.id, ProgressInput::Amount(4))
        .await
        .unwrap();

    clock.advance(Duration::days(1));
    let ResetOutcome::Applied(report) = engine.check_daily_reset(PLAYER).await.unwrap() else {
        panic!("expected a reset");
    };
    assert_eq!(report.settlement.incomplete_quests, 1);

    for quest in engine.quests(PLAYER).await.unwrap() {
        if quest.id == normal.id {
            assert_eq!(quest.current_count, 4);
            continue;
        }
        assert_eq!(quest.current_count, 0);
        assert!(!quest.completed);
        assert_eq!(quest.last_reset, Some(clock.now()));
    }

    // A daily quest completed yesterday can be completed again today
    engine
        .update_quest_progress(PLAYER, &done.id, ProgressInput::Complete)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_goal_tracks_settle_with_the_day() {
    let (engine, clock) = setup().await;
    grant_exp(&engine, 3, 50).await;

    engine
        .add_daily_track(
            PLAYER,
            TrackSpec {
                id: "water".into(),
                name: "Water".into(),
                unit: Some("glasses".into()),
                target: 8,
                reward: Reward::new(20, 5),
                penalty: Reward::new(30, 0),
            },
        )
        .await
        .unwrap();
    engine
        .add_daily_track(
            PLAYER,
            TrackSpec {
                id: "steps".into(),
                name: "Steps".into(),
                unit: None,
                target: 10_000,
                reward: Reward::new(10, 0),
                penalty: Reward::new(-15, 0),
            },
        )
        .await
        .unwrap();

    engine.log_daily_track(PLAYER, "water", 5).await.unwrap();
    let water = engine.log_daily_track(PLAYER, "water", 3).await.unwrap();
    assert!(water.is_met());
    engine.log_daily_track(PLAYER, "steps", 4_000).await.unwrap();

    clock.advance(Duration::days(1));
    let ResetOutcome::Applied(report) = engine.check_daily_reset(PLAYER).await.unwrap() else {
        panic!("expected a reset");
    };
    // +20/+5 for water, -15 for steps (penalties are magnitudes)
    assert_eq!(report.settlement.net, Reward::new(5, 5));
    assert_eq!(report.settlement.track_outcomes.len(), 2);

    let profile = engine.profile(PLAYER).await.unwrap();
    assert_eq!(profile.gold, 5);
    assert!(profile.daily_tracks.iter().all(|t| t.current == 0));
}

#[tokio::test]
async fn test_track_errors() {
    let (engine, _) = setup().await;
    assert!(matches!(
        engine.log_daily_track(PLAYER, "nope", 1).await,
        Err(hunter::GameError::UnknownTrack(_))
    ));

    let spec = TrackSpec {
        id: "read".into(),
        name: "Reading".into(),
        unit: Some("pages".into()),
        target: 20,
        reward: Reward::ZERO,
        penalty: Reward::ZERO,
    };
    engine.add_daily_track(PLAYER, spec.clone()).await.unwrap();
    assert!(matches!(
        engine.add_daily_track(PLAYER, spec.clone()).await,
        Err(hunter::GameError::Validation(_))
    ));
    assert!(matches!(
        engine
            .add_daily_track(PLAYER, TrackSpec { target: 0, ..spec })
            .await,
        Err(hunter::GameError::Validation(_))
    ));
}

#[tokio::test]
async fn test_never_reset_profile_is_initialized_without_penalty() {
    let (engine, _) = setup().await;
    let mut profile = PlayerProfile::new("legacy", day_one());
    profile.level = 4;
    profile.exp_needed = hunter::core::experience::exp_needed(4);
    engine
        .store()
        .create(PlayerRecord::new(profile.clone()))
        .await
        .unwrap();

    let outcome = engine.check_daily_reset("legacy").await.unwrap();
    assert_eq!(
        outcome,
        ResetOutcome::Initialized {
            date: day_one().date_naive()
        }
    );
    let stored = engine.profile("legacy").await.unwrap();
    assert_eq!(stored.level, 4);
    assert_eq!(stored.last_daily_reset, Some(day_one().date_naive()));
}
