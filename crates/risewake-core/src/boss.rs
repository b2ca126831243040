//! Weekly boss combat state.
//!
//! The boss is a shared weekly adversary: challenge completions deal damage,
//! snoozes feed its scoreboard. There is no player-HP resource; snooze
//! damage is bookkeeping only. State is replaced wholesale when the
//! calendar week rolls over.

use serde::{Deserialize, Serialize};

use crate::alarm::ChallengeType;
use crate::catalog::bosses::{boss_by_id, boss_for_week, Boss};

/// Base damage per completed challenge, doubled on a weakness match.
const BASE_CHALLENGE_DAMAGE: u32 = 50;

/// Outcome of one damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub damage: u32,
    /// True only on the hit that brought hp to zero.
    pub defeated_now: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossState {
    pub week_number: u32,
    pub boss_id: String,
    pub current_hp: u32,
    pub max_hp: u32,
    pub damage_dealt: u32,
    pub snooze_damage_taken: u32,
    /// Sticky once hp reaches zero; cleared only by weekly rollover.
    pub defeated: bool,
}

impl BossState {
    /// Fresh state for the boss assigned to `week`.
    pub fn for_week(week: u32) -> Self {
        let boss = boss_for_week(week);
        Self {
            week_number: week,
            boss_id: boss.id.to_string(),
            current_hp: boss.max_hp,
            max_hp: boss.max_hp,
            damage_dealt: 0,
            snooze_damage_taken: 0,
            defeated: false,
        }
    }

    /// Catalog entry for the current boss. Falls back to the weekly
    /// rotation if the stored id is stale.
    pub fn boss(&self) -> &'static Boss {
        boss_by_id(&self.boss_id).unwrap_or_else(|| boss_for_week(self.week_number))
    }

    /// Replace the whole state when the week index changed.
    /// Returns true if a rollover happened.
    pub fn rollover_if_new_week(&mut self, week: u32) -> bool {
        if self.week_number == week {
            return false;
        }
        *self = BossState::for_week(week);
        true
    }

    /// Apply challenge damage: fixed base, doubled on the boss's weakness.
    /// Hp clamps at zero and a defeated boss takes no further damage.
    pub fn apply_challenge_damage(&mut self, challenge: ChallengeType) -> DamageOutcome {
        if self.defeated {
            return DamageOutcome {
                damage: 0,
                defeated_now: false,
            };
        }
        let boss = self.boss();
        let damage = if challenge == boss.weakness {
            BASE_CHALLENGE_DAMAGE * 2
        } else {
            BASE_CHALLENGE_DAMAGE
        };
        self.current_hp = self.current_hp.saturating_sub(damage);
        self.damage_dealt += damage;
        let defeated_now = self.current_hp == 0;
        if defeated_now {
            self.defeated = true;
        }
        DamageOutcome {
            damage,
            defeated_now,
        }
    }

    /// Add the boss's attack power to the snooze scoreboard.
    /// Returns the damage taken (0 once the boss is down).
    pub fn apply_snooze_penalty(&mut self) -> u32 {
        if self.defeated {
            return 0;
        }
        let power = self.boss().attack_power;
        self.snooze_damage_taken += power;
        power
    }

    /// 0.0 .. 1.0 remaining hp.
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weakness_doubles_damage() {
        // Week 0: Draugr, weak to shake, 500 hp.
        let mut boss = BossState::for_week(0);
        let out = boss.apply_challenge_damage(ChallengeType::Math);
        assert_eq!(out.damage, 50);
        let out = boss.apply_challenge_damage(ChallengeType::Shake);
        assert_eq!(out.damage, 100);
        assert_eq!(boss.current_hp, 350);
        assert_eq!(boss.damage_dealt, 150);
    }

    #[test]
    fn hp_clamps_and_defeat_is_sticky() {
        let mut boss = BossState::for_week(0);
        boss.current_hp = 60;
        let out = boss.apply_challenge_damage(ChallengeType::Shake);
        assert_eq!(boss.current_hp, 0);
        assert!(out.defeated_now);
        assert!(boss.defeated);

        // No further damage, no re-defeat.
        let again = boss.apply_challenge_damage(ChallengeType::Shake);
        assert_eq!(again.damage, 0);
        assert!(!again.defeated_now);
        assert!(boss.defeated);
        assert_eq!(boss.snooze_damage_taken, 0);
        assert_eq!(boss.apply_snooze_penalty(), 0);
    }

    #[test]
    fn snooze_penalty_feeds_scoreboard_only() {
        let mut boss = BossState::for_week(0);
        let taken = boss.apply_snooze_penalty();
        assert_eq!(taken, 15);
        assert_eq!(boss.snooze_damage_taken, 15);
        // Player hp doesn't exist; boss hp untouched.
        assert_eq!(boss.current_hp, boss.max_hp);
    }

    #[test]
    fn weekly_rollover_replaces_state() {
        let mut boss = BossState::for_week(3);
        boss.apply_challenge_damage(ChallengeType::Memory);
        assert!(!boss.rollover_if_new_week(3));
        assert!(boss.rollover_if_new_week(4));
        assert_eq!(boss.boss_id, "nidhogg");
        assert_eq!(boss.current_hp, boss.max_hp);
        assert_eq!(boss.damage_dealt, 0);
        assert!(!boss.defeated);
    }
}
