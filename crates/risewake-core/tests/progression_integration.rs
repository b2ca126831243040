//! Integration tests for the multi-day progression lifecycle.

use chrono::NaiveDate;
use risewake_core::{ChallengeType, DismissContext, FixedClock, ProgressionEngine};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn multi_day_streak_lifecycle() {
    // Jan 5-7 2026 all fall in week 0; Jan 8 starts week 1.
    let mut clock = FixedClock::on(date(2026, 1, 5), 6, 30);
    let mut engine = ProgressionEngine::new(clock.clone());
    let ctx = DismissContext::default();

    let day1 = engine.dismiss_alarm(ChallengeType::Math, 0, &ctx);
    assert_eq!(day1.streak, 1);
    assert_eq!(day1.xp_earned, 25);
    assert_eq!(day1.coins_earned, 10);
    assert_eq!(day1.wake_score, 86); // 40 + 25 + 10 + 10 + 0.7
    assert!(day1.new_achievements.is_empty());

    clock.advance_days(1);
    engine = ProgressionEngine::from_state(engine.into_state(), clock.clone());
    let day2 = engine.dismiss_alarm(ChallengeType::Math, 0, &ctx);
    assert_eq!(day2.streak, 2);
    assert_eq!(day2.xp_earned, 25);

    // Day 3: the 1.5x streak multiplier kicks in and streak_3 unlocks.
    clock.advance_days(1);
    engine = ProgressionEngine::from_state(engine.into_state(), clock.clone());
    let day3 = engine.dismiss_alarm(ChallengeType::Math, 0, &ctx);
    assert_eq!(day3.streak, 3);
    assert_eq!(day3.new_achievements.len(), 1);
    assert_eq!(day3.new_achievements[0].id, "streak_3");
    // 25 * 1.5 = 38 base, +100 achievement XP.
    assert_eq!(day3.xp_earned, 138);
    assert_eq!(day3.coins_earned, 15 + 50);
    // 50 XP before + 138 crosses the level-1 threshold of 100.
    assert!(day3.leveled_up);
    assert_eq!(engine.state().profile.level, 1);

    // Skipping Jan 8 breaks the streak; Jan 9 is also a new boss week.
    clock.advance_days(2);
    engine = ProgressionEngine::from_state(engine.into_state(), clock.clone());
    let day5 = engine.dismiss_alarm(ChallengeType::Math, 0, &ctx);
    assert_eq!(day5.streak, 1);
    assert_eq!(engine.state().profile.longest_streak, 3);
    assert_eq!(engine.state().boss.week_number, 1);
    assert_eq!(engine.state().boss.boss_id, "frost_giant");
}

#[test]
fn same_day_dismissals_do_not_stack_streak() {
    let clock = FixedClock::on(date(2026, 3, 2), 7, 0);
    let mut engine = ProgressionEngine::new(clock);
    let ctx = DismissContext::default();

    assert_eq!(engine.dismiss_alarm(ChallengeType::Trivia, 0, &ctx).streak, 1);
    assert_eq!(engine.dismiss_alarm(ChallengeType::Trivia, 0, &ctx).streak, 1);
    assert_eq!(engine.state().stats.total_dismissals, 2);
}

#[test]
fn grace_token_shields_streak_and_refreshes_monthly() {
    let mut clock = FixedClock::on(date(2026, 1, 5), 6, 45);
    let mut engine = ProgressionEngine::new(clock.clone());
    let ctx = DismissContext::default();

    engine.dismiss_alarm(ChallengeType::Shake, 0, &ctx);
    assert_eq!(engine.state().profile.current_streak, 1);

    // Next morning the user sleeps in and spends the token instead.
    clock.advance_days(1);
    engine = ProgressionEngine::from_state(engine.into_state(), clock.clone());
    assert!(engine.use_grace_token(1));
    assert!(!engine.state().profile.grace_token_available);
    assert!(!engine.use_grace_token(1));

    // The shielded day counts as woken, so the streak extends.
    clock.advance_days(1);
    engine = ProgressionEngine::from_state(engine.into_state(), clock.clone());
    let outcome = engine.dismiss_alarm(ChallengeType::Shake, 0, &ctx);
    assert_eq!(outcome.streak, 2);

    // A new calendar month refreshes the token.
    clock.advance_days(26); // Feb 2
    engine = ProgressionEngine::from_state(engine.into_state(), clock.clone());
    assert!(engine.use_grace_token(1));
    assert_eq!(engine.state().profile.grace_tokens_used_total, 2);
}

#[test]
fn multiple_grace_tokens_per_month() {
    let mut clock = FixedClock::on(date(2026, 4, 6), 7, 0);
    let mut engine = ProgressionEngine::new(clock.clone());

    assert!(engine.use_grace_token(2));
    assert!(engine.state().profile.grace_token_available);

    clock.advance_days(3);
    engine = ProgressionEngine::from_state(engine.into_state(), clock.clone());
    assert!(engine.use_grace_token(2));
    assert!(!engine.state().profile.grace_token_available);
    assert!(!engine.use_grace_token(2));
}

#[test]
fn wake_proof_result_feeds_next_dismissal_only() {
    let clock = FixedClock::on(date(2026, 2, 10), 6, 0);
    let mut engine = ProgressionEngine::new(clock);
    let ctx = DismissContext {
        wake_proof_enabled: true,
        ..DismissContext::default()
    };

    engine.record_wake_proof_result(true);
    let first = engine.dismiss_alarm(ChallengeType::Memory, 0, &ctx);
    // 40 + 25 + 20 + 10 + 0.7
    assert_eq!(first.wake_score, 96);
    assert_eq!(engine.state().stats.wake_proof_passes, 1);

    // The recorded result was consumed; the next dismissal has none.
    let second = engine.dismiss_alarm(ChallengeType::Memory, 0, &ctx);
    assert_eq!(second.wake_score, 86);
}

#[test]
fn routine_completion_scales_wake_score() {
    let clock = FixedClock::on(date(2026, 2, 10), 6, 0);
    let mut engine = ProgressionEngine::new(clock);
    let ctx = DismissContext {
        routine_task_ids: vec!["water".into(), "stretch".into()],
        ..DismissContext::default()
    };

    // One of two tasks done before the alarm fires.
    assert!(engine.complete_routine_task("water"));
    assert!(!engine.complete_routine_task("water")); // idempotent
    assert!(!engine.complete_routine_task("bogus_task"));

    let outcome = engine.dismiss_alarm(ChallengeType::Typing, 0, &ctx);
    // 40 + 25 + 10 + 5 + 0.7
    assert_eq!(outcome.wake_score, 81);
}

#[test]
fn snooze_only_hurts_score_and_boss_scoreboard() {
    let clock = FixedClock::on(date(2026, 2, 10), 6, 0);
    let mut engine = ProgressionEngine::new(clock);
    let ctx = DismissContext::default();

    let before_coins = engine.state().profile.coins;
    let damage = engine.snooze_alarm();
    assert!(damage > 0);
    assert_eq!(engine.state().profile.coins, before_coins);
    assert_eq!(engine.state().profile.current_streak, 0);

    // Dismissing after two snoozes (at the limit of 2) zeroes punctuality.
    let outcome = engine.dismiss_alarm(ChallengeType::Steps, 2, &ctx);
    // 0 + 25 + 10 + 10 + 0.7
    assert_eq!(outcome.wake_score, 46);
    // Rewards shrink by the snooze factor 1 - 0.2*2 = 0.6.
    assert_eq!(outcome.xp_earned, 15);
}
