//! Progression engine.
//!
//! All player-progression state lives in a single [`ProgressionState`]
//! snapshot. Every public operation is a pure transaction: it takes the
//! current snapshot plus the injected time and returns the next snapshot
//! together with an outcome for the presentation layer. Nothing is ever
//! persisted or observed partially updated.
//!
//! [`ProgressionEngine`] is a thin mutable wrapper that owns a snapshot
//! and a [`Clock`], swapping snapshots atomically per operation.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::achievements::{self, ProgressSnapshot, UnlockedAchievements};
use crate::alarm::{Alarm, ChallengeType, Difficulty};
use crate::error::CoreError;
use crate::boss::BossState;
use crate::catalog::achievements::Achievement;
use crate::catalog::levels::level_for_xp;
use crate::catalog::routine::routine_task;
use crate::character::{self, CharacterStats};
use crate::clock::{week_of_year, Clock};
use crate::difficulty::DifficultyWindow;
use crate::profile::{PlayerProfile, PlayerStats, RoutineDay, SleepLogEntry, YearMonth, SLEEP_LOG_CAP};
use crate::wake_score::{
    wake_score, WakeProofOutcome, WakeScoreHistory, WakeScoreInput, WakeScoreSummary,
};

const BASE_XP: f64 = 25.0;
const BASE_COINS: f64 = 10.0;
const SNOOZE_PENALTY_PER_USE: f64 = 0.2;
const SNOOZE_PENALTY_FLOOR: f64 = 0.5;

const PRACTICE_XP: u64 = 5;
const PRACTICE_COINS: u64 = 2;
const ROUTINE_XP: u64 = 5;
const ROUTINE_COINS: u64 = 2;

/// Days of sleep log feeding the character-stats derivation.
const CHARACTER_WINDOW_DAYS: i64 = 14;

/// The injected "now", reduced to what transactions need.
#[derive(Debug, Clone, Copy)]
pub struct DayStamp {
    pub date: NaiveDate,
    pub minute_of_day: u32,
    pub week: u32,
}

impl DayStamp {
    pub fn from_clock<C: Clock>(clock: &C) -> Self {
        let date = clock.today();
        Self {
            date,
            minute_of_day: clock.minute_of_day(),
            week: week_of_year(date),
        }
    }
}

/// Alarm-derived inputs for a dismissal transaction.
#[derive(Debug, Clone)]
pub struct DismissContext {
    pub snooze_limit: u32,
    pub wake_proof_enabled: bool,
    /// Routine task ids attached to the dismissed alarm.
    pub routine_task_ids: Vec<String>,
    /// External premium-tier bonus; applies to coins only.
    pub reward_multiplier: f64,
}

impl DismissContext {
    pub fn from_alarm(alarm: &Alarm, reward_multiplier: f64) -> Self {
        Self {
            snooze_limit: alarm.snooze_limit,
            wake_proof_enabled: alarm.wake_proof_enabled,
            routine_task_ids: alarm.morning_routine.clone(),
            reward_multiplier,
        }
    }
}

impl Default for DismissContext {
    fn default() -> Self {
        Self {
            snooze_limit: 2,
            wake_proof_enabled: false,
            routine_task_ids: Vec::new(),
            reward_multiplier: 1.0,
        }
    }
}

/// Consolidated result of one dismissal transaction.
#[derive(Debug, Clone)]
pub struct DismissOutcome {
    /// Includes achievement and boss-loot bonuses.
    pub xp_earned: u64,
    pub coins_earned: u64,
    pub streak: u32,
    pub new_achievements: Vec<&'static Achievement>,
    pub boss_defeated: bool,
    pub leveled_up: bool,
    pub wake_score: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct PracticeOutcome {
    pub xp_earned: u64,
    pub coins_earned: u64,
    pub leveled_up: bool,
}

/// The whole persistent progression model, serialized as one blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionState {
    pub profile: PlayerProfile,
    pub stats: PlayerStats,
    pub boss: BossState,
    pub unlocked: UnlockedAchievements,
    pub sleep_log: Vec<SleepLogEntry>,
    pub score_history: WakeScoreHistory,
    pub character: CharacterStats,
    pub difficulty: DifficultyWindow,
    pub routine: RoutineDay,
    /// Latest recorded wake-proof result, consumed by the next dismissal.
    pub last_wake_proof: Option<bool>,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ProgressionState {
    pub fn new(week: u32) -> Self {
        Self {
            profile: PlayerProfile::default(),
            stats: PlayerStats::default(),
            boss: BossState::for_week(week),
            unlocked: UnlockedAchievements::default(),
            sleep_log: Vec::new(),
            score_history: WakeScoreHistory::default(),
            character: CharacterStats::default(),
            difficulty: DifficultyWindow::default(),
            routine: RoutineDay::default(),
            last_wake_proof: None,
        }
    }

    /// Sleep-log entries inside the trailing 14-day window.
    pub fn recent_sleep_log(&self, today: NaiveDate) -> Vec<SleepLogEntry> {
        let cutoff = today - Duration::days(CHARACTER_WINDOW_DAYS - 1);
        self.sleep_log
            .iter()
            .copied()
            .filter(|e| e.date >= cutoff && e.date <= today)
            .collect()
    }

    /// The dismiss-alarm transaction. Fixed step order:
    /// streak, base reward, boss, cumulative stats, wake score + log,
    /// character/difficulty recompute, grace refresh, achievements, level.
    pub fn dismiss_alarm(
        &self,
        challenge: ChallengeType,
        snoozes_used: u32,
        ctx: &DismissContext,
        stamp: &DayStamp,
    ) -> (Self, DismissOutcome) {
        let mut next = self.clone();
        let today = stamp.date;

        // 1. Streak delta from (last wake date, today, yesterday).
        let yesterday = today.pred_opt();
        let streak = match next.profile.last_wake_date {
            Some(last) if last == today => next.profile.current_streak,
            Some(last) if Some(last) == yesterday => next.profile.current_streak + 1,
            None => next.profile.current_streak + 1,
            Some(_) => 1,
        };
        next.profile.current_streak = streak;
        next.profile.longest_streak = next.profile.longest_streak.max(streak);
        next.profile.last_wake_date = Some(today);

        // 2. Base reward with streak multiplier and snooze penalty.
        let streak_multiplier = if streak >= 7 {
            2.0
        } else if streak >= 3 {
            1.5
        } else {
            1.0
        };
        let snooze_factor =
            (1.0 - SNOOZE_PENALTY_PER_USE * snoozes_used as f64).max(SNOOZE_PENALTY_FLOOR);
        let base_xp = (BASE_XP * streak_multiplier * snooze_factor).round() as u64;
        let base_coins =
            (BASE_COINS * streak_multiplier * snooze_factor * ctx.reward_multiplier.max(0.0))
                .round() as u64;

        // 3. Weekly rollover, then challenge damage.
        next.boss.rollover_if_new_week(stamp.week);
        let hit = next.boss.apply_challenge_damage(challenge);
        let mut bonus_xp = 0u64;
        let mut bonus_coins = 0u64;
        if hit.defeated_now {
            next.stats.bosses_defeated += 1;
            let loot = next.boss.boss().loot;
            bonus_xp += loot.xp;
            bonus_coins += loot.coins;
        }

        // 4. Cumulative stats and the rolling success window.
        next.stats.total_dismissals += 1;
        next.stats.record_challenge(challenge);
        next.stats.total_coins_earned += base_coins;
        next.stats.record_wake_time(stamp.minute_of_day);
        next.difficulty.record(true);

        // 5. Wake score and sleep log.
        let routine_completion = if ctx.routine_task_ids.is_empty() {
            // No routine configured: vacuously complete.
            1.0
        } else {
            next.routine.completed_of(today, &ctx.routine_task_ids) as f64
                / ctx.routine_task_ids.len() as f64
        };
        let proof = if !ctx.wake_proof_enabled {
            WakeProofOutcome::NotConfigured
        } else {
            match next.last_wake_proof {
                Some(true) => WakeProofOutcome::Passed,
                Some(false) => WakeProofOutcome::Failed,
                // Enabled but no check recorded yet for this wake.
                None => WakeProofOutcome::NotConfigured,
            }
        };
        let score = wake_score(&WakeScoreInput {
            snoozes_used,
            snooze_limit: ctx.snooze_limit,
            challenges_passed: true,
            wake_proof: proof,
            routine_completion,
            streak_days: streak,
        });
        next.score_history.record(today, score);
        next.sleep_log.push(SleepLogEntry {
            date: today,
            wake_minutes: stamp.minute_of_day,
            snoozes_used,
            wake_score: score,
            routine_tasks_completed: next.routine.completed_count(today),
        });
        if next.sleep_log.len() > SLEEP_LOG_CAP {
            let excess = next.sleep_log.len() - SLEEP_LOG_CAP;
            next.sleep_log.drain(..excess);
        }
        next.last_wake_proof = None;

        // 6. Derived attributes and difficulty.
        let recent = next.recent_sleep_log(today);
        next.character = character::derive(&recent, &next.stats, streak);
        next.difficulty.recommend();

        // 7. Monthly grace-token refresh.
        refresh_grace_token(&mut next.profile, today);

        // 8. Achievements; level checked against the pre-bonus XP.
        let snapshot = ProgressSnapshot {
            streak,
            dismissals: next.stats.total_dismissals,
            bosses_defeated: next.stats.bosses_defeated,
            level: level_for_xp(next.profile.xp + base_xp),
            lifetime_coins: next.stats.total_coins_earned,
            challenges_completed: next.stats.challenges_completed(),
        };
        let new_achievements = achievements::evaluate(&snapshot, &mut next.unlocked);
        for achievement in &new_achievements {
            bonus_xp += achievement.reward.xp;
            bonus_coins += achievement.reward.coins;
        }

        // 9. Final totals and level.
        let xp_earned = base_xp + bonus_xp;
        let coins_earned = base_coins + bonus_coins;
        let leveled_up = next.profile.gain_xp(xp_earned);
        next.profile.coins += coins_earned;

        let outcome = DismissOutcome {
            xp_earned,
            coins_earned,
            streak,
            new_achievements,
            boss_defeated: hit.defeated_now,
            leveled_up,
            wake_score: score,
        };
        (next, outcome)
    }

    /// Snooze: counter, success-window zero and boss scoreboard only.
    /// Never reduces XP, coins or streak. Returns the scoreboard delta.
    pub fn snooze_alarm(&self, stamp: &DayStamp) -> (Self, u32) {
        let mut next = self.clone();
        next.stats.total_snoozes += 1;
        next.difficulty.record(false);
        next.boss.rollover_if_new_week(stamp.week);
        let damage = next.boss.apply_snooze_penalty();
        (next, damage)
    }

    /// Off-alarm practice run. Success pays a small flat reward and feeds
    /// the per-type counters; failure only feeds the success window.
    pub fn practice_challenge(
        &self,
        challenge: ChallengeType,
        success: bool,
    ) -> (Self, Option<PracticeOutcome>) {
        let mut next = self.clone();
        next.difficulty.record(success);
        if !success {
            return (next, None);
        }
        next.stats.record_challenge(challenge);
        next.stats.total_coins_earned += PRACTICE_COINS;
        let leveled_up = next.profile.gain_xp(PRACTICE_XP);
        next.profile.coins += PRACTICE_COINS;
        let outcome = PracticeOutcome {
            xp_earned: PRACTICE_XP,
            coins_earned: PRACTICE_COINS,
            leveled_up,
        };
        (next, Some(outcome))
    }

    /// Spend a grace token to shield the streak. Returns false (and
    /// changes nothing) when no token is available this month.
    pub fn use_grace_token(&self, today: NaiveDate, tokens_per_month: u32) -> (Self, bool) {
        let mut next = self.clone();
        refresh_grace_token(&mut next.profile, today);
        if !next.profile.grace_token_available {
            return (next, false);
        }

        let month = YearMonth::of(today);
        if next.profile.grace_token_last_used == Some(month) {
            next.profile.grace_tokens_used_this_month += 1;
        } else {
            next.profile.grace_token_last_used = Some(month);
            next.profile.grace_tokens_used_this_month = 1;
        }
        next.profile.grace_tokens_used_total += 1;
        if next.profile.grace_tokens_used_this_month >= tokens_per_month.max(1) {
            next.profile.grace_token_available = false;
        }

        // The shielded day counts as woken so the next dismissal extends
        // rather than resets the streak.
        next.profile.current_streak = next.profile.current_streak.max(1);
        next.profile.longest_streak = next.profile.longest_streak.max(next.profile.current_streak);
        next.profile.last_wake_date = Some(today);
        (next, true)
    }

    /// Idempotent per calendar day; unknown task ids are no-ops.
    /// First completion pays a flat bonus and counts toward today's
    /// routine tally used by the next dismissal.
    pub fn complete_routine_task(&self, task_id: &str, today: NaiveDate) -> (Self, bool) {
        if routine_task(task_id).is_none() {
            return (self.clone(), false);
        }
        let mut next = self.clone();
        if !next.routine.mark(today, task_id) {
            return (next, false);
        }
        next.profile.gain_xp(ROUTINE_XP);
        next.profile.coins += ROUTINE_COINS;
        next.stats.total_coins_earned += ROUTINE_COINS;
        (next, true)
    }

    /// Record a wake-proof check result; consumed by the next dismissal's
    /// wake score and by the discipline attribute.
    pub fn record_wake_proof_result(&self, passed: bool) -> Self {
        let mut next = self.clone();
        next.stats.wake_proof_attempts += 1;
        if passed {
            next.stats.wake_proof_passes += 1;
        }
        next.last_wake_proof = Some(passed);
        next
    }

    /// Explicit weekly rollover hook. Returns true if the boss changed.
    pub fn reset_boss_if_new_week(&self, week: u32) -> (Self, bool) {
        let mut next = self.clone();
        let rolled = next.boss.rollover_if_new_week(week);
        (next, rolled)
    }

    pub fn wake_score_summary(&self, today: NaiveDate) -> WakeScoreSummary {
        WakeScoreSummary {
            today: self.score_history.today(today),
            week_avg: self.score_history.week_average(today),
            all_time_avg: self.score_history.all_time_average(),
        }
    }

    /// Serialize the snapshot as pretty JSON (backup export).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(CoreError::from)
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json).map_err(CoreError::from)
    }

    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), CoreError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(CoreError::from)
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(CoreError::from)?;
        Self::from_json(&content)
    }
}

fn refresh_grace_token(profile: &mut PlayerProfile, today: NaiveDate) {
    let month = YearMonth::of(today);
    if let Some(last) = profile.grace_token_last_used {
        if last != month {
            profile.grace_token_available = true;
            profile.grace_tokens_used_this_month = 0;
        }
    }
}

/// Owns a snapshot and a clock; swaps snapshots atomically per operation.
#[derive(Debug, Clone)]
pub struct ProgressionEngine<C: Clock> {
    state: ProgressionState,
    clock: C,
}

impl<C: Clock> ProgressionEngine<C> {
    pub fn new(clock: C) -> Self {
        let state = ProgressionState::new(week_of_year(clock.today()));
        Self { state, clock }
    }

    pub fn from_state(state: ProgressionState, clock: C) -> Self {
        Self { state, clock }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn into_state(self) -> ProgressionState {
        self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn stamp(&self) -> DayStamp {
        DayStamp::from_clock(&self.clock)
    }

    pub fn dismiss_alarm(
        &mut self,
        challenge: ChallengeType,
        snoozes_used: u32,
        ctx: &DismissContext,
    ) -> DismissOutcome {
        let (next, outcome) = self.state.dismiss_alarm(challenge, snoozes_used, ctx, &self.stamp());
        self.state = next;
        outcome
    }

    pub fn snooze_alarm(&mut self) -> u32 {
        let (next, damage) = self.state.snooze_alarm(&self.stamp());
        self.state = next;
        damage
    }

    pub fn practice_challenge(
        &mut self,
        challenge: ChallengeType,
        success: bool,
    ) -> Option<PracticeOutcome> {
        let (next, outcome) = self.state.practice_challenge(challenge, success);
        self.state = next;
        outcome
    }

    pub fn use_grace_token(&mut self, tokens_per_month: u32) -> bool {
        let (next, used) = self.state.use_grace_token(self.clock.today(), tokens_per_month);
        self.state = next;
        used
    }

    pub fn complete_routine_task(&mut self, task_id: &str) -> bool {
        let (next, first) = self.state.complete_routine_task(task_id, self.clock.today());
        self.state = next;
        first
    }

    pub fn record_wake_proof_result(&mut self, passed: bool) {
        self.state = self.state.record_wake_proof_result(passed);
    }

    pub fn reset_boss_if_new_week(&mut self) -> bool {
        let (next, rolled) = self
            .state
            .reset_boss_if_new_week(week_of_year(self.clock.today()));
        self.state = next;
        rolled
    }

    pub fn wake_score_summary(&self) -> WakeScoreSummary {
        self.state.wake_score_summary(self.clock.today())
    }

    pub fn adaptive_difficulty(&self) -> Difficulty {
        self.state.difficulty.recommendation()
    }
}
