//! Motion-based sleep-stage classification.
//!
//! Accelerometer magnitude samples are batched into fixed 30-second epochs.
//! Each epoch is classified from the variance of the deviation from standard
//! gravity: very still means deep sleep, moderate restlessness means light
//! sleep (the ideal wake window), high movement means the user is already
//! awake. The smart-wake decision triggers early on light/awake epochs
//! inside a caregiver-configured pre-alarm window, and never holds the
//! alarm past its target time plus a short grace.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Standard gravity; deviation from this magnitude is movement.
const GRAVITY: f64 = 9.81;

/// Variance below this is deep sleep.
const DEEP_THRESHOLD: f64 = 0.015;
/// Variance below this (and above deep) is light sleep.
const LIGHT_THRESHOLD: f64 = 0.08;
/// Variance at or above this is awake. The band between LIGHT and AWAKE
/// also classifies as light: the two restlessness sub-bands were collapsed
/// deliberately, since the trigger policy treats them identically.
const AWAKE_THRESHOLD: f64 = 0.3;

const EPOCH_DURATION: i64 = 30; // seconds
const SAMPLES_PER_EPOCH: usize = 300; // 10 Hz x 30 s

/// Minutes past the target after which a trigger decision is stale.
const PAST_TARGET_GRACE_MIN: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepState {
    Deep,
    Light,
    Awake,
    Unknown,
}

/// Result of evaluating one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochResult {
    pub variance: f64,
    pub mean_deviation: f64,
    pub state: SleepState,
    pub sample_count: usize,
}

/// Accumulates motion samples and classifies one epoch at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepEpochTracker {
    samples: Vec<f64>,
    epoch_start: DateTime<Utc>,
    light_epochs: u32,
    total_epochs: u32,
}

impl SleepEpochTracker {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            samples: Vec::new(),
            epoch_start: now,
            light_epochs: 0,
            total_epochs: 0,
        }
    }

    /// Buffer one raw accelerometer reading (x, y, z in m/s^2) as the
    /// absolute deviation of its magnitude from gravity.
    pub fn add_sample(&mut self, x: f64, y: f64, z: f64) {
        let magnitude = (x * x + y * y + z * z).sqrt();
        self.samples.push((magnitude - GRAVITY).abs());
    }

    /// True once the sample budget or the epoch duration is exhausted.
    pub fn is_epoch_complete(&self, now: DateTime<Utc>) -> bool {
        self.samples.len() >= SAMPLES_PER_EPOCH
            || now - self.epoch_start >= Duration::seconds(EPOCH_DURATION)
    }

    /// Classify the buffered samples, then clear the buffer and restart
    /// the epoch timer. Zero samples classify as unknown.
    pub fn evaluate_epoch(&mut self, now: DateTime<Utc>) -> EpochResult {
        if self.samples.is_empty() {
            // Sensor dropout; unknown epochs don't count toward the
            // light-sleep ratio.
            self.epoch_start = now;
            return EpochResult {
                variance: 0.0,
                mean_deviation: 0.0,
                state: SleepState::Unknown,
                sample_count: 0,
            };
        }

        let result = {
            let n = self.samples.len();
            let mean = self.samples.iter().sum::<f64>() / n as f64;
            let variance = self
                .samples
                .iter()
                .map(|s| (s - mean) * (s - mean))
                .sum::<f64>()
                / n as f64;

            let state = classify(variance);
            if state == SleepState::Light {
                self.light_epochs += 1;
            }

            EpochResult {
                variance: round_to(variance, 4),
                mean_deviation: round_to(mean, 3),
                state,
                sample_count: n,
            }
        };

        self.total_epochs += 1;
        self.samples.clear();
        self.epoch_start = now;
        result
    }

    /// Fraction of evaluated epochs classified as light sleep.
    pub fn light_sleep_ratio(&self) -> f64 {
        if self.total_epochs == 0 {
            return 0.0;
        }
        self.light_epochs as f64 / self.total_epochs as f64
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn total_epochs(&self) -> u32 {
        self.total_epochs
    }

    /// Clear all buffers and running counters.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.samples.clear();
        self.epoch_start = now;
        self.light_epochs = 0;
        self.total_epochs = 0;
    }
}

fn classify(variance: f64) -> SleepState {
    if variance < DEEP_THRESHOLD {
        SleepState::Deep
    } else if variance < AWAKE_THRESHOLD {
        // Covers both restlessness bands below and above LIGHT_THRESHOLD.
        debug_assert!(LIGHT_THRESHOLD < AWAKE_THRESHOLD);
        SleepState::Light
    } else {
        SleepState::Awake
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Decide whether to fire the alarm early.
///
/// Never fires outside the pre-alarm window or more than 5 minutes past
/// the target; always fires at or past the target; inside the window it
/// fires only on light or awake epochs.
pub fn should_trigger_smart_wake(
    state: SleepState,
    minutes_until_target: i64,
    window_minutes: i64,
) -> bool {
    if minutes_until_target > window_minutes || minutes_until_target < -PAST_TARGET_GRACE_MIN {
        return false;
    }
    if minutes_until_target <= 0 {
        return true;
    }
    matches!(state, SleepState::Light | SleepState::Awake)
}
