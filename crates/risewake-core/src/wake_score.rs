//! Composite daily wake-quality score.
//!
//! A 0-100 blend of five components:
//! punctuality (40), challenge success (25), wake-proof confirmation (20),
//! routine completion (10) and streak bonus (5).

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

const PUNCTUALITY_MAX: f64 = 40.0;
const CHALLENGE_POINTS: f64 = 25.0;
const WAKE_PROOF_PASSED: f64 = 20.0;
const WAKE_PROOF_NOT_CONFIGURED: f64 = 10.0;
const ROUTINE_MAX: f64 = 10.0;
const STREAK_MAX: f64 = 5.0;
const STREAK_POINTS_PER_DAY: f64 = 0.7;

/// Wake-proof outcome for the scored wake event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WakeProofOutcome {
    /// The alarm has no wake-proof check configured.
    NotConfigured,
    Passed,
    Failed,
}

#[derive(Debug, Clone, Copy)]
pub struct WakeScoreInput {
    pub snoozes_used: u32,
    pub snooze_limit: u32,
    pub challenges_passed: bool,
    pub wake_proof: WakeProofOutcome,
    /// 0.0 .. 1.0 fraction of the alarm's routine tasks completed.
    pub routine_completion: f64,
    pub streak_days: u32,
}

/// Compute the composite score, rounded and clamped to [0, 100].
pub fn wake_score(input: &WakeScoreInput) -> u8 {
    let punctuality = if input.snooze_limit == 0 {
        if input.snoozes_used == 0 {
            PUNCTUALITY_MAX
        } else {
            0.0
        }
    } else {
        let used = (input.snoozes_used as f64 / input.snooze_limit as f64).min(1.0);
        PUNCTUALITY_MAX * (1.0 - used)
    };

    let challenge = if input.challenges_passed {
        CHALLENGE_POINTS
    } else {
        0.0
    };

    let proof = match input.wake_proof {
        WakeProofOutcome::Passed => WAKE_PROOF_PASSED,
        WakeProofOutcome::NotConfigured => WAKE_PROOF_NOT_CONFIGURED,
        WakeProofOutcome::Failed => 0.0,
    };

    let routine = ROUTINE_MAX * input.routine_completion.clamp(0.0, 1.0);
    let streak = (input.streak_days as f64 * STREAK_POINTS_PER_DAY).min(STREAK_MAX);

    let total = punctuality + challenge + proof + routine + streak;
    total.round().clamp(0.0, 100.0) as u8
}

/// One recorded daily score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub date: NaiveDate,
    pub score: u8,
}

/// Rolling history of the last 30 daily wake scores, with a lifetime
/// running total so the all-time average survives eviction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WakeScoreHistory {
    entries: Vec<ScoreEntry>,
    lifetime_sum: u64,
    lifetime_count: u64,
}

const HISTORY_CAP: usize = 30;

impl WakeScoreHistory {
    pub fn record(&mut self, date: NaiveDate, score: u8) {
        self.entries.push(ScoreEntry { date, score });
        if self.entries.len() > HISTORY_CAP {
            let excess = self.entries.len() - HISTORY_CAP;
            self.entries.drain(..excess);
        }
        self.lifetime_sum += score as u64;
        self.lifetime_count += 1;
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Most recent score recorded on `today`, if any.
    pub fn today(&self, today: NaiveDate) -> Option<u8> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.date == today)
            .map(|e| e.score)
    }

    /// Average over entries from the trailing 7 days (inclusive of today).
    pub fn week_average(&self, today: NaiveDate) -> f64 {
        let cutoff = today - Duration::days(6);
        let recent: Vec<_> = self
            .entries
            .iter()
            .filter(|e| e.date >= cutoff && e.date <= today)
            .collect();
        if recent.is_empty() {
            return 0.0;
        }
        recent.iter().map(|e| e.score as f64).sum::<f64>() / recent.len() as f64
    }

    pub fn all_time_average(&self) -> f64 {
        if self.lifetime_count == 0 {
            return 0.0;
        }
        self.lifetime_sum as f64 / self.lifetime_count as f64
    }
}

/// Answer to the wake-score query surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WakeScoreSummary {
    pub today: Option<u8>,
    pub week_avg: f64,
    pub all_time_avg: f64,
}
