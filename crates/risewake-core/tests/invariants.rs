//! Property tests for the scoring and progression invariants.

use proptest::prelude::*;
use risewake_core::boss::BossState;
use risewake_core::catalog::level_for_xp;
use risewake_core::wake_score::{wake_score, WakeProofOutcome, WakeScoreInput};
use risewake_core::ChallengeType;

fn proof_strategy() -> impl Strategy<Value = WakeProofOutcome> {
    prop_oneof![
        Just(WakeProofOutcome::NotConfigured),
        Just(WakeProofOutcome::Passed),
        Just(WakeProofOutcome::Failed),
    ]
}

fn challenge_strategy() -> impl Strategy<Value = ChallengeType> {
    prop_oneof![
        Just(ChallengeType::Math),
        Just(ChallengeType::Trivia),
        Just(ChallengeType::Shake),
        Just(ChallengeType::Memory),
        Just(ChallengeType::Typing),
        Just(ChallengeType::Steps),
    ]
}

proptest! {
    #[test]
    fn wake_score_stays_in_range(
        snoozes_used in 0u32..20,
        snooze_limit in 0u32..10,
        challenges_passed: bool,
        wake_proof in proof_strategy(),
        routine_completion in -1.0f64..2.0,
        streak_days in 0u32..1000,
    ) {
        let score = wake_score(&WakeScoreInput {
            snoozes_used,
            snooze_limit,
            challenges_passed,
            wake_proof,
            routine_completion,
            streak_days,
        });
        prop_assert!(score <= 100);
    }

    #[test]
    fn level_is_monotone_in_xp(a in 0u64..200_000, b in 0u64..200_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_for_xp(lo) <= level_for_xp(hi));
    }

    #[test]
    fn boss_hp_never_underflows_and_defeat_is_sticky(
        week in 0u32..104,
        hits in proptest::collection::vec(challenge_strategy(), 1..200),
    ) {
        let mut boss = BossState::for_week(week);
        let mut defeat_count = 0;
        for challenge in hits {
            let hit = boss.apply_challenge_damage(challenge);
            if hit.defeated_now {
                defeat_count += 1;
            }
            prop_assert!(boss.current_hp <= boss.max_hp);
            if boss.defeated {
                prop_assert_eq!(boss.current_hp, 0);
            }
        }
        prop_assert!(defeat_count <= 1);
    }
}
