//! Player profile and cumulative statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::alarm::ChallengeType;
use crate::catalog::levels::{level_for_xp, title_for_level};

/// Year-month pair used for grace-token refresh bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// Core RPG state: experience, currency, streaks and grace tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub xp: u64,
    pub coins: u64,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_wake_date: Option<NaiveDate>,
    pub grace_token_available: bool,
    pub grace_token_last_used: Option<YearMonth>,
    /// Tokens consumed in the month of `grace_token_last_used`.
    pub grace_tokens_used_this_month: u32,
    pub grace_tokens_used_total: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            xp: 0,
            coins: 0,
            level: 0,
            current_streak: 0,
            longest_streak: 0,
            last_wake_date: None,
            grace_token_available: true,
            grace_token_last_used: None,
            grace_tokens_used_this_month: 0,
            grace_tokens_used_total: 0,
        }
    }
}

impl PlayerProfile {
    /// Title derived from the current level.
    pub fn title(&self) -> &'static str {
        title_for_level(self.level)
    }

    /// Add XP and recompute the level. Returns true if the level rose.
    pub fn gain_xp(&mut self, xp: u64) -> bool {
        self.xp += xp;
        let new_level = level_for_xp(self.xp);
        let leveled_up = new_level > self.level;
        self.level = new_level;
        leveled_up
    }
}

/// Lifetime counters used by achievements and character stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_dismissals: u32,
    pub total_snoozes: u32,
    pub math_solved: u32,
    pub trivia_correct: u32,
    pub shakes_completed: u32,
    pub memory_completed: u32,
    pub typing_completed: u32,
    pub steps_completed: u32,
    pub bosses_defeated: u32,
    pub total_coins_earned: u64,
    pub wake_proof_attempts: u32,
    pub wake_proof_passes: u32,
    /// Earliest wake seen, minutes since midnight.
    pub earliest_wake_minutes: Option<u32>,
    /// Last 30 wake times, minutes since midnight.
    pub wake_times: Vec<u32>,
}

const WAKE_TIME_CAP: usize = 30;

impl PlayerStats {
    pub fn record_challenge(&mut self, challenge: ChallengeType) {
        match challenge {
            ChallengeType::Math => self.math_solved += 1,
            ChallengeType::Trivia => self.trivia_correct += 1,
            ChallengeType::Shake => self.shakes_completed += 1,
            ChallengeType::Memory => self.memory_completed += 1,
            ChallengeType::Typing => self.typing_completed += 1,
            ChallengeType::Steps => self.steps_completed += 1,
        }
    }

    /// Completions of a single challenge type.
    pub fn completions_of(&self, challenge: ChallengeType) -> u32 {
        match challenge {
            ChallengeType::Math => self.math_solved,
            ChallengeType::Trivia => self.trivia_correct,
            ChallengeType::Shake => self.shakes_completed,
            ChallengeType::Memory => self.memory_completed,
            ChallengeType::Typing => self.typing_completed,
            ChallengeType::Steps => self.steps_completed,
        }
    }

    /// Summed completions across every challenge type.
    pub fn challenges_completed(&self) -> u32 {
        ChallengeType::ALL
            .iter()
            .map(|c| self.completions_of(*c))
            .sum()
    }

    /// Completions of physically active challenge types.
    pub fn physical_completions(&self) -> u32 {
        ChallengeType::ALL
            .iter()
            .filter(|c| c.is_physical())
            .map(|c| self.completions_of(*c))
            .sum()
    }

    pub fn record_wake_time(&mut self, minutes: u32) {
        self.earliest_wake_minutes = Some(match self.earliest_wake_minutes {
            Some(earliest) => earliest.min(minutes),
            None => minutes,
        });
        self.wake_times.push(minutes);
        if self.wake_times.len() > WAKE_TIME_CAP {
            let excess = self.wake_times.len() - WAKE_TIME_CAP;
            self.wake_times.drain(..excess);
        }
    }

    pub fn average_wake_minutes(&self) -> Option<u32> {
        if self.wake_times.is_empty() {
            return None;
        }
        let sum: u64 = self.wake_times.iter().map(|&m| m as u64).sum();
        Some((sum as f64 / self.wake_times.len() as f64).round() as u32)
    }

    /// Wake-proof pass rate over all attempts; 0.0 with no attempts.
    pub fn wake_proof_pass_rate(&self) -> f64 {
        if self.wake_proof_attempts == 0 {
            return 0.0;
        }
        self.wake_proof_passes as f64 / self.wake_proof_attempts as f64
    }
}

/// One entry in the rolling sleep log (most recent 60 retained).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SleepLogEntry {
    pub date: NaiveDate,
    pub wake_minutes: u32,
    pub snoozes_used: u32,
    pub wake_score: u8,
    pub routine_tasks_completed: u32,
}

pub const SLEEP_LOG_CAP: usize = 60;

/// Per-day routine completion set, making task completion idempotent
/// within a calendar day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoutineDay {
    date: Option<NaiveDate>,
    completed: Vec<String>,
}

impl RoutineDay {
    /// Mark a task done today. Returns true only on first completion.
    pub fn mark(&mut self, today: NaiveDate, task_id: &str) -> bool {
        if self.date != Some(today) {
            self.date = Some(today);
            self.completed.clear();
        }
        if self.completed.iter().any(|id| id == task_id) {
            return false;
        }
        self.completed.push(task_id.to_string());
        true
    }

    /// Tasks completed today (0 if the stored day is stale).
    pub fn completed_count(&self, today: NaiveDate) -> u32 {
        if self.date == Some(today) {
            self.completed.len() as u32
        } else {
            0
        }
    }

    /// How many of the given task ids were completed today.
    pub fn completed_of(&self, today: NaiveDate, task_ids: &[String]) -> u32 {
        if self.date != Some(today) {
            return 0;
        }
        task_ids
            .iter()
            .filter(|id| self.completed.iter().any(|c| c == *id))
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    #[test]
    fn level_follows_xp() {
        let mut profile = PlayerProfile::default();
        assert!(!profile.gain_xp(50));
        assert_eq!(profile.level, 0);
        assert!(profile.gain_xp(60)); // 110 total -> level 1
        assert_eq!(profile.level, 1);
        assert_eq!(profile.title(), "Wanderer");
    }

    #[test]
    fn physical_completions_track_physical_kinds_only() {
        let mut stats = PlayerStats::default();
        stats.record_challenge(ChallengeType::Shake);
        stats.record_challenge(ChallengeType::Steps);
        stats.record_challenge(ChallengeType::Math);
        assert_eq!(stats.physical_completions(), 2);
        assert_eq!(stats.challenges_completed(), 3);
        assert_eq!(stats.completions_of(ChallengeType::Shake), 1);
    }

    #[test]
    fn wake_time_ring_and_earliest() {
        let mut stats = PlayerStats::default();
        for m in [480, 450, 470] {
            stats.record_wake_time(m);
        }
        assert_eq!(stats.earliest_wake_minutes, Some(450));
        assert_eq!(stats.average_wake_minutes(), Some(467));

        for _ in 0..40 {
            stats.record_wake_time(400);
        }
        assert_eq!(stats.wake_times.len(), 30);
    }

    #[test]
    fn routine_day_is_idempotent_per_day() {
        let mut routine = RoutineDay::default();
        assert!(routine.mark(date(1), "water"));
        assert!(!routine.mark(date(1), "water"));
        assert_eq!(routine.completed_count(date(1)), 1);

        // New day resets the set.
        assert!(routine.mark(date(2), "water"));
        assert_eq!(routine.completed_count(date(1)), 0);
        assert_eq!(routine.completed_count(date(2)), 1);
    }

    #[test]
    fn completed_of_counts_only_listed_tasks() {
        let mut routine = RoutineDay::default();
        routine.mark(date(1), "water");
        routine.mark(date(1), "journal");
        let alarm_routine = vec!["water".to_string(), "stretch".to_string()];
        assert_eq!(routine.completed_of(date(1), &alarm_routine), 1);
    }
}
