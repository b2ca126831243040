//! Derived character attributes.
//!
//! Discipline, energy and consistency are recomputed fully on every wake
//! event from the trailing 14-day sleep log slice plus lifetime counters.
//! Nothing here is incremental; the inputs are small.

use serde::{Deserialize, Serialize};

use crate::profile::{PlayerStats, SleepLogEntry};

/// Wake times at or after this minute don't count as "early" for energy.
const EARLY_WAKE_MINUTE: u32 = 7 * 60;

/// Minimum samples before the wake-time variance term applies.
const MIN_VARIANCE_SAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    pub discipline: u8,
    pub energy: u8,
    pub consistency: u8,
}

/// Recompute all three attributes from the trailing 14-day log slice.
pub fn derive(recent: &[SleepLogEntry], stats: &PlayerStats, streak: u32) -> CharacterStats {
    CharacterStats {
        discipline: discipline(recent, stats),
        energy: energy(recent, stats, streak),
        consistency: consistency(recent, streak),
    }
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// 40 x zero-snooze-day rate + 30 x wake-proof pass rate + 30 x routine-day rate.
fn discipline(recent: &[SleepLogEntry], stats: &PlayerStats) -> u8 {
    let days = recent.len() as f64;
    let (no_snooze, routine) = if recent.is_empty() {
        (0.0, 0.0)
    } else {
        let no_snooze_days = recent.iter().filter(|e| e.snoozes_used == 0).count() as f64;
        let routine_days = recent
            .iter()
            .filter(|e| e.routine_tasks_completed > 0)
            .count() as f64;
        (no_snooze_days / days, routine_days / days)
    };
    clamp_score(40.0 * no_snooze + 30.0 * stats.wake_proof_pass_rate() + 30.0 * routine)
}

/// min(30, 3 x streak) + min(30, 0.5 x physical completions) + 40 x early-wake rate.
fn energy(recent: &[SleepLogEntry], stats: &PlayerStats, streak: u32) -> u8 {
    let streak_term = (streak as f64 * 3.0).min(30.0);
    let physical_term = (stats.physical_completions() as f64 * 0.5).min(30.0);
    let early_term = if recent.is_empty() {
        0.0
    } else {
        let early = recent
            .iter()
            .filter(|e| e.wake_minutes < EARLY_WAKE_MINUTE)
            .count() as f64;
        40.0 * early / recent.len() as f64
    };
    clamp_score(streak_term + physical_term + early_term)
}

/// 0.7 x (100 - min(100, 1.67 x stddev of wake minutes)) + min(30, 2 x streak).
/// The variance term needs at least 3 samples, otherwise it contributes 0.
fn consistency(recent: &[SleepLogEntry], streak: u32) -> u8 {
    let variance_term = if recent.len() >= MIN_VARIANCE_SAMPLES {
        let sd = wake_time_stddev(recent);
        0.7 * (100.0 - (1.67 * sd).min(100.0))
    } else {
        0.0
    };
    let streak_term = (streak as f64 * 2.0).min(30.0);
    clamp_score(variance_term + streak_term)
}

fn wake_time_stddev(entries: &[SleepLogEntry]) -> f64 {
    let n = entries.len() as f64;
    let mean = entries.iter().map(|e| e.wake_minutes as f64).sum::<f64>() / n;
    let variance = entries
        .iter()
        .map(|e| {
            let d = e.wake_minutes as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(day: u32, wake_minutes: u32, snoozes: u32, routine: u32) -> SleepLogEntry {
        SleepLogEntry {
            date: NaiveDate::from_ymd_opt(2026, 5, day).unwrap(),
            wake_minutes,
            snoozes_used: snoozes,
            wake_score: 80,
            routine_tasks_completed: routine,
        }
    }

    #[test]
    fn empty_slice_defaults_to_streak_terms_only() {
        let stats = PlayerStats::default();
        let derived = derive(&[], &stats, 5);
        assert_eq!(derived.discipline, 0);
        assert_eq!(derived.energy, 15); // min(30, 5*3)
        assert_eq!(derived.consistency, 10); // min(30, 5*2)
    }

    #[test]
    fn discipline_full_marks() {
        let recent = vec![entry(1, 400, 0, 2), entry(2, 405, 0, 1)];
        let stats = PlayerStats {
            wake_proof_attempts: 4,
            wake_proof_passes: 4,
            ..Default::default()
        };
        // 40*1 + 30*1 + 30*1.
        assert_eq!(derive(&recent, &stats, 0).discipline, 100);
    }

    #[test]
    fn energy_counts_early_wakes_before_seven() {
        let recent = vec![entry(1, 415, 0, 0), entry(2, 425, 0, 0)];
        let stats = PlayerStats {
            shakes_completed: 10,
            steps_completed: 10,
            ..Default::default()
        };
        // streak 0 + min(30, 0.5*20)=10 + 40*(1/2)=20.
        assert_eq!(derive(&recent, &stats, 0).energy, 30);
    }

    #[test]
    fn consistency_needs_three_samples() {
        let stats = PlayerStats::default();
        let two = vec![entry(1, 400, 0, 0), entry(2, 500, 0, 0)];
        assert_eq!(derive(&two, &stats, 0).consistency, 0);

        // Identical wake times: sd 0 -> 0.7*100 = 70.
        let three = vec![entry(1, 420, 0, 0), entry(2, 420, 0, 0), entry(3, 420, 0, 0)];
        assert_eq!(derive(&three, &stats, 0).consistency, 70);
    }

    #[test]
    fn consistency_penalizes_scatter() {
        let stats = PlayerStats::default();
        // sd of [360, 420, 480] = sqrt(2400) ~ 48.99 -> 1.67*sd ~ 81.8.
        let scattered = vec![entry(1, 360, 0, 0), entry(2, 420, 0, 0), entry(3, 480, 0, 0)];
        let derived = derive(&scattered, &stats, 0);
        assert!(derived.consistency < 20);
    }

    #[test]
    fn all_attributes_clamp_to_100() {
        let recent: Vec<_> = (1..=14).map(|d| entry(d, 300, 0, 2)).collect();
        let stats = PlayerStats {
            wake_proof_attempts: 1,
            wake_proof_passes: 1,
            shakes_completed: 100,
            steps_completed: 100,
            ..Default::default()
        };
        let derived = derive(&recent, &stats, 50);
        assert_eq!(derived.discipline, 100);
        assert_eq!(derived.energy, 100);
        assert_eq!(derived.consistency, 100);
    }
}
