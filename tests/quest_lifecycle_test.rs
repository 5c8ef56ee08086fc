//! Integration test: quest lifecycle
//!
//! Creation defaults, progress updates with the flat reward, direct
//! completion with the scaled reward, deletion, same-day rejection of daily
//! quests and the streak they drive.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hunter::engine::Engine;
use hunter::notify::NullSink;
use hunter::quests::types::{ProgressInput, QuestKind, QuestSpec};
use hunter::{Catalog, EngineConfig, GameError, ManualClock, MemoryStore, Reward};
use std::sync::Arc;

const PLAYER: &str = "jinwoo";

fn day_one() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
}

async fn setup() -> (Engine<MemoryStore>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(day_one()));
    let engine = Engine::new(
        Arc::new(MemoryStore::new()),
        clock.clone(),
        Arc::new(NullSink),
        Catalog::builtin(),
        EngineConfig::default(),
    )
    .unwrap();
    engine.create_player(PLAYER).await.unwrap();
    (engine, clock)
}

fn normal(target: i64) -> QuestSpec {
    QuestSpec {
        title: Some("Pushups".into()),
        metric: Some("pushups".into()),
        target_count: Some(target),
        ..QuestSpec::default()
    }
}

fn daily(target: i64) -> QuestSpec {
    QuestSpec {
        kind: QuestKind::Daily,
        ..normal(target)
    }
}

#[tokio::test]
async fn test_create_fills_defaults() {
    let (engine, _) = setup().await;
    let quest = engine
        .create_quest(
            PLAYER,
            QuestSpec {
                title: Some("   ".into()),
                target_count: Some(-3),
                ..QuestSpec::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(quest.title, "New Quest");
    assert_eq!(quest.target_count, 5);
    assert_eq!(quest.metric, "times");
    assert_eq!(quest.current_count, 0);
    assert!(!quest.completed);
    assert!(quest.last_reset.is_none());

    let daily = engine.create_quest(PLAYER, daily(2)).await.unwrap();
    assert_eq!(daily.last_reset, Some(day_one()));
    assert_eq!(engine.quests(PLAYER).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_progress_completes_normal_quest_with_flat_reward() {
    let (engine, _) = setup().await;
    let quest = engine.create_quest(PLAYER, normal(3)).await.unwrap();

    let update = engine
        .update_quest_progress(PLAYER, &quest.id, ProgressInput::Amount(2))
        .await
        .unwrap();
    assert_eq!(update.outcome.new_count, 2);
    assert!(!update.outcome.completed);
    assert!(update.progression.is_none());
    assert_eq!(engine.profile(PLAYER).await.unwrap().exp, 0);

    let update = engine
        .update_quest_progress(PLAYER, &quest.id, ProgressInput::Amount(5))
        .await
        .unwrap();
    assert_eq!(update.outcome.new_count, 3);
    assert!(update.outcome.completed);
    let report = update.progression.unwrap();
    assert_eq!(report.reward, Reward::new(25, 15));

    let profile = engine.profile(PLAYER).await.unwrap();
    assert_eq!(profile.quests_completed, 1);
    // Flat reward plus the first Quest Master rank (25 exp / 10 gold)
    assert_eq!(profile.achievement_rank("quest_master"), 1);
    assert_eq!(profile.exp, 50);
    assert_eq!(profile.gold, 25);

    // Normal quests are removed once completed
    assert!(engine.quests(PLAYER).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_direct_completion_uses_scaled_reward() {
    let (engine, _) = setup().await;
    let quest = engine.create_quest(PLAYER, normal(4)).await.unwrap();

    let completion = engine.complete_quest(PLAYER, &quest.id).await.unwrap();
    assert_eq!(completion.progression.reward, Reward::new(40, 20));
    assert!(completion.quest.completed);
    assert_eq!(completion.quest.current_count, 4);
    assert!(engine.quests(PLAYER).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_and_not_found() {
    let (engine, _) = setup().await;
    let quest = engine.create_quest(PLAYER, normal(3)).await.unwrap();

    let removed = engine.delete_quest(PLAYER, &quest.id).await.unwrap();
    assert_eq!(removed.id, quest.id);
    assert!(engine.quests(PLAYER).await.unwrap().is_empty());

    let before = engine.profile(PLAYER).await.unwrap();
    assert!(matches!(
        engine.delete_quest(PLAYER, &quest.id).await,
        Err(GameError::QuestNotFound(_))
    ));
    assert!(matches!(
        engine
            .update_quest_progress(PLAYER, &quest.id, ProgressInput::Amount(1))
            .await,
        Err(GameError::QuestNotFound(_))
    ));
    assert!(matches!(
        engine.complete_quest(PLAYER, "missing").await,
        Err(GameError::QuestNotFound(_))
    ));
    assert_eq!(engine.profile(PLAYER).await.unwrap(), before);
}

#[tokio::test]
async fn test_daily_quest_twice_same_day_is_rejected() {
    let (engine, clock) = setup().await;
    let quest = engine.create_quest(PLAYER, daily(2)).await.unwrap();

    let update = engine
        .update_quest_progress(PLAYER, &quest.id, ProgressInput::Complete)
        .await
        .unwrap();
    assert!(update.outcome.completed);
    assert_eq!(update.progression.unwrap().reward, Reward::new(50, 25));

    // Late the same calendar day is still "today"
    clock.advance(Duration::hours(14));
    let before = engine.profile(PLAYER).await.unwrap();
    let quests_before = engine.quests(PLAYER).await.unwrap();

    assert!(matches!(
        engine
            .update_quest_progress(PLAYER, &quest.id, ProgressInput::Amount(1))
            .await,
        Err(GameError::AlreadyCompletedToday(_))
    ));
    assert!(matches!(
        engine.complete_quest(PLAYER, &quest.id).await,
        Err(GameError::AlreadyCompletedToday(_))
    ));

    assert_eq!(engine.profile(PLAYER).await.unwrap(), before);
    assert_eq!(engine.quests(PLAYER).await.unwrap(), quests_before);

    // Daily quests stay stored, marked completed
    let stored = &quests_before[0];
    assert!(stored.completed);
    assert_eq!(stored.last_completion, Some(day_one()));
}

#[tokio::test]
async fn test_streak_follows_consecutive_days() {
    let (engine, clock) = setup().await;
    let quest = engine.create_quest(PLAYER, daily(1)).await.unwrap();

    engine
        .update_quest_progress(PLAYER, &quest.id, ProgressInput::Complete)
        .await
        .unwrap();
    assert_eq!(engine.profile(PLAYER).await.unwrap().streak, 1);

    clock.advance(Duration::days(1));
    engine.check_daily_reset(PLAYER).await.unwrap();
    assert_eq!(engine.profile(PLAYER).await.unwrap().streak, 1);
    engine
        .update_quest_progress(PLAYER, &quest.id, ProgressInput::Complete)
        .await
        .unwrap();
    assert_eq!(engine.profile(PLAYER).await.unwrap().streak, 2);

    // Skipping a whole day breaks the streak at the next reset
    clock.advance(Duration::days(2));
    engine.check_daily_reset(PLAYER).await.unwrap();
    assert_eq!(engine.profile(PLAYER).await.unwrap().streak, 0);
    engine
        .update_quest_progress(PLAYER, &quest.id, ProgressInput::Complete)
        .await
        .unwrap();
    assert_eq!(engine.profile(PLAYER).await.unwrap().streak, 1);
}
