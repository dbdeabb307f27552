//! End-to-end scoring tests.
//!
//! This test file verifies:
//! - The worked scoring example through the public API
//! - Streak multipliers flowing from persisted state into scores
//! - The explicit activity path recording the streak, and reports never doing so
//! - A load → score → record → save cycle through a repository

use lifetrack_core::aggregate::{days_window, AggregateOptions};
use lifetrack_core::clock::MS_PER_MINUTE;
use lifetrack_core::streak::StreakTransition;
use lifetrack_core::{
    aggregate_range, DayClock, InMemoryRepository, Interval, IntervalKind, MultiplierState,
    ScoringEngine, SharedStreakTracker, StateRepository, StreakPolicy, StreakState, StreakTracker,
};

/// 2026-01-01T00:00:00Z
const DAY0: i64 = 1_767_225_600_000;
const DAY: i64 = 24 * 60 * MS_PER_MINUTE;

fn workout() -> Interval {
    let start = DAY0 + 8 * 60 * MS_PER_MINUTE;
    Interval::new("run", start, start + 90 * MS_PER_MINUTE, IntervalKind::Task)
        .with_importance(8.0)
        .with_difficulty(6.0)
        .with_goal("Fitness")
}

#[test]
fn test_worked_example() {
    let mut multipliers = MultiplierState::new();
    multipliers.upsert_goal("fitness", 1.2).unwrap();
    let engine = ScoringEngine::without_streak(&multipliers, DAY0 + DAY);

    let points = engine.score_interval(&workout(), None, None);
    assert!((points - 86.4).abs() < 1e-9);

    let breakdown = engine.breakdown(&workout(), None, None);
    assert_eq!(breakdown.base, 48.0);
    assert_eq!(breakdown.minutes, 90);
    assert_eq!(breakdown.goal_multiplier, 1.2);
    assert_eq!(breakdown.project_multiplier, 1.0);
    assert!((breakdown.total_multiplier() - 1.2).abs() < 1e-12);
}

#[test]
fn test_streak_state_scales_scores() {
    let multipliers = MultiplierState::new();
    let policy = StreakPolicy::default();
    let streak = StreakState {
        current_streak: 10,
        longest_streak: 10,
        total_active_days: 10,
        ..Default::default()
    };
    let tracker = StreakTracker::from_state(streak, policy, DayClock::utc());
    let engine = ScoringEngine::from_tracker(&multipliers, &tracker, DAY0);
    let plain = ScoringEngine::without_streak(&multipliers, DAY0);

    let interval = Interval::new("t", DAY0, DAY0 + 60 * MS_PER_MINUTE, IntervalKind::Task);
    let boosted = engine.score_interval(&interval, None, None);
    let base = plain.score_interval(&interval, None, None);
    assert!((boosted / base - 1.01f64.powi(10)).abs() < 1e-12);
}

#[test]
fn test_missed_day_drops_persisted_streak_bonus() {
    let multipliers = MultiplierState::new();
    let streak = StreakState {
        current_streak: 100,
        longest_streak: 100,
        total_active_days: 100,
        last_active_day: Some(DayClock::utc().day_key(DAY0 - 3 * DAY)),
        history: Vec::new(),
    };
    let tracker = StreakTracker::from_state(streak, StreakPolicy::default(), DayClock::utc());

    let engine = ScoringEngine::from_tracker(&multipliers, &tracker, DAY0);
    assert_eq!(engine.streak_multiplier(), 1.0);

    let window = days_window(&DayClock::utc(), DayClock::utc().day_key(DAY0), 1);
    let report = aggregate_range(
        &[workout()],
        window,
        &DayClock::utc(),
        &engine,
        AggregateOptions::default(),
    );
    assert!((report.total_points - 48.0 * 1.5).abs() < 1e-9);
}

#[test]
fn test_activity_path_records_but_reports_do_not() {
    let multipliers = MultiplierState::new();
    let shared = SharedStreakTracker::new(StreakTracker::default());
    let now = DAY0 + 10 * 60 * MS_PER_MINUTE;
    let engine = ScoringEngine::without_streak(&multipliers, now);

    // Reports over the same data leave the streak alone
    let window = days_window(&DayClock::utc(), DayClock::utc().day_key(DAY0), 1);
    let report = aggregate_range(
        &[workout()],
        window,
        &DayClock::utc(),
        &engine,
        AggregateOptions::default(),
    );
    assert_eq!(report.total_minutes, 90);
    assert_eq!(shared.snapshot(), StreakState::default());

    let mut recorder = shared.clone();
    let scored = engine.score_and_record_activity(&workout(), &mut recorder);
    assert!(scored.points > 0.0);
    assert_eq!(scored.transition, Some(StreakTransition::Started));
    assert_eq!(shared.snapshot().current_streak, 1);
}

#[test]
fn test_zero_point_activity_does_not_count() {
    let multipliers = MultiplierState::new();
    let mut tracker = StreakTracker::default();
    let engine = ScoringEngine::without_streak(&multipliers, DAY0);

    let log = Interval::log("weight", DAY0);
    let scored = engine.score_and_record_activity(&log, &mut tracker);
    assert_eq!(scored.points, 0.0);
    assert!(scored.transition.is_none());

    let empty = Interval::new("empty", DAY0, DAY0, IntervalKind::Task);
    assert!(engine
        .score_and_record_activity(&empty, &mut tracker)
        .transition
        .is_none());
    assert_eq!(tracker.current_streak(), 0);
}

#[test]
fn test_repository_cycle() {
    let repo = InMemoryRepository::new();
    let mut multipliers = repo.load_multipliers().unwrap();
    multipliers.upsert_project("Thesis", 2.0).unwrap();
    repo.save_multipliers(&multipliers).unwrap();

    for day in 0..3 {
        let now = DAY0 + day * DAY + 12 * 60 * MS_PER_MINUTE;
        let multipliers = repo.load_multipliers().unwrap();
        let mut tracker = StreakTracker::from_state(
            repo.load_streak().unwrap(),
            StreakPolicy::default(),
            DayClock::utc(),
        );
        let engine = ScoringEngine::new(&multipliers, tracker.multiplier(), now);
        let interval = Interval::new("write", now - 60 * MS_PER_MINUTE, now, IntervalKind::Task)
            .with_project("thesis");
        let scored = engine.score_and_record_activity(&interval, &mut tracker);
        let expected = 25.0 * 2.0 * 1.01f64.powi(day as i32);
        assert!((scored.points - expected).abs() < 1e-9);
        repo.save_streak(tracker.state()).unwrap();
    }

    let state = repo.load_streak().unwrap();
    assert_eq!(state.current_streak, 3);
    assert_eq!(state.history.len(), 3);
}

#[test]
fn test_running_episode_scores_up_to_now() {
    let multipliers = MultiplierState::new();
    let now = DAY0 + 45 * MS_PER_MINUTE;
    let engine = ScoringEngine::without_streak(&multipliers, now);
    let episode = Interval::new("focus", DAY0, DAY0, IntervalKind::Episode).running();
    assert_eq!(engine.interval_minutes(&episode, None, None), 45);
    assert!((engine.score_interval(&episode, None, None) - 18.75).abs() < 1e-12);
}
