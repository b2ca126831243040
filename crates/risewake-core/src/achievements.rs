//! Idempotent achievement evaluation.
//!
//! The evaluator scans the static catalog in order, skips anything already
//! unlocked and returns newly met entries exactly once. Rewards are folded
//! into the triggering transaction by the caller.

use serde::{Deserialize, Serialize};

use crate::catalog::achievements::{Achievement, UnlockCondition, ACHIEVEMENTS};

/// Append-only, duplicate-free set of unlocked achievement ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnlockedAchievements {
    ids: Vec<String>,
}

impl UnlockedAchievements {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|u| u == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn insert(&mut self, id: &str) {
        if !self.contains(id) {
            self.ids.push(id.to_string());
        }
    }
}

/// Cumulative counters an unlock condition can check against.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressSnapshot {
    pub streak: u32,
    pub dismissals: u32,
    pub bosses_defeated: u32,
    pub level: u32,
    pub lifetime_coins: u64,
    pub challenges_completed: u32,
}

impl ProgressSnapshot {
    fn meets(&self, condition: UnlockCondition) -> bool {
        match condition {
            UnlockCondition::Streak(n) => self.streak >= n,
            UnlockCondition::Dismissals(n) => self.dismissals >= n,
            UnlockCondition::BossesDefeated(n) => self.bosses_defeated >= n,
            UnlockCondition::Level(n) => self.level >= n,
            UnlockCondition::LifetimeCoins(n) => self.lifetime_coins >= n,
            UnlockCondition::ChallengesCompleted(n) => self.challenges_completed >= n,
        }
    }
}

/// Scan the catalog against the snapshot, appending newly met ids to
/// `unlocked` and returning the batch in catalog order.
pub fn evaluate(
    snapshot: &ProgressSnapshot,
    unlocked: &mut UnlockedAchievements,
) -> Vec<&'static Achievement> {
    let mut newly = Vec::new();
    for achievement in ACHIEVEMENTS.iter() {
        if unlocked.contains(achievement.id) {
            continue;
        }
        if snapshot.meets(achievement.condition) {
            unlocked.insert(achievement.id);
            newly.push(achievement);
        }
    }
    newly
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocks_in_catalog_order() {
        let snapshot = ProgressSnapshot {
            streak: 7,
            dismissals: 10,
            ..Default::default()
        };
        let mut unlocked = UnlockedAchievements::default();
        let batch = evaluate(&snapshot, &mut unlocked);
        let ids: Vec<_> = batch.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["streak_3", "streak_7", "dismiss_10"]);
    }

    #[test]
    fn second_evaluation_unlocks_nothing() {
        let snapshot = ProgressSnapshot {
            streak: 7,
            dismissals: 10,
            ..Default::default()
        };
        let mut unlocked = UnlockedAchievements::default();
        let first = evaluate(&snapshot, &mut unlocked);
        assert_eq!(first.len(), 3);
        let second = evaluate(&snapshot, &mut unlocked);
        assert!(second.is_empty());
        assert_eq!(unlocked.len(), 3);
    }

    #[test]
    fn no_duplicate_ids_under_repeated_conditions() {
        let mut unlocked = UnlockedAchievements::default();
        let snapshot = ProgressSnapshot {
            lifetime_coins: 600,
            ..Default::default()
        };
        evaluate(&snapshot, &mut unlocked);
        evaluate(&snapshot, &mut unlocked);
        let count = unlocked.ids().iter().filter(|id| *id == "coins_500").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn level_and_boss_conditions() {
        let snapshot = ProgressSnapshot {
            level: 5,
            bosses_defeated: 1,
            ..Default::default()
        };
        let mut unlocked = UnlockedAchievements::default();
        let batch = evaluate(&snapshot, &mut unlocked);
        let ids: Vec<_> = batch.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["boss_1", "level_5"]);
    }
}
