//! Adaptive challenge difficulty.
//!
//! Tracks a rolling window of the most recent 20 pass/fail outcomes and
//! maps the success rate to a tier. The band between 0.40 and 0.70 is
//! deliberately sticky so the recommendation doesn't oscillate.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::alarm::Difficulty;

const WINDOW_CAP: usize = 20;
const MIN_SAMPLES: usize = 5;
const HARD_RATE: f64 = 0.85;
const MEDIUM_RATE: f64 = 0.70;
const EASY_RATE: f64 = 0.40;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyWindow {
    outcomes: VecDeque<bool>,
    recommendation: Difficulty,
}

impl Default for DifficultyWindow {
    fn default() -> Self {
        Self {
            outcomes: VecDeque::new(),
            recommendation: Difficulty::Medium,
        }
    }
}

impl DifficultyWindow {
    /// Append one pass/fail outcome, evicting the oldest past 20.
    pub fn record(&mut self, success: bool) {
        self.outcomes.push_back(success);
        while self.outcomes.len() > WINDOW_CAP {
            self.outcomes.pop_front();
        }
    }

    pub fn sample_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Mean of the window; None below the minimum sample count.
    pub fn success_rate(&self) -> Option<f64> {
        if self.outcomes.len() < MIN_SAMPLES {
            return None;
        }
        let passes = self.outcomes.iter().filter(|&&s| s).count() as f64;
        Some(passes / self.outcomes.len() as f64)
    }

    /// Current recommendation, updated from the window. Inside the
    /// hysteresis band (0.40 ..= 0.70) the previous tier is retained.
    pub fn recommend(&mut self) -> Difficulty {
        if let Some(rate) = self.success_rate() {
            if rate > HARD_RATE {
                self.recommendation = Difficulty::Hard;
            } else if rate > MEDIUM_RATE {
                self.recommendation = Difficulty::Medium;
            } else if rate < EASY_RATE {
                self.recommendation = Difficulty::Easy;
            }
        }
        self.recommendation
    }

    pub fn recommendation(&self) -> Difficulty {
        self.recommendation
    }
}
