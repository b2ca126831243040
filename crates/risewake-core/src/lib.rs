//! # Risewake Core Library
//!
//! This library provides the core logic for Risewake, a gamified
//! morning-routine engine. It converts real-world wake events (alarm
//! dismissals, snoozes, challenge outcomes, accelerometer motion samples)
//! into a persistent player-progression model, and implements a CLI-first
//! philosophy: all operations are available via a standalone CLI binary,
//! with any GUI being a thin layer over the same core.
//!
//! ## Architecture
//!
//! - **Progression Engine**: every public operation is a pure transaction
//!   over a single state snapshot; nothing is observed partially updated
//! - **Sleep Classifier**: batches accelerometer samples into 30-second
//!   epochs and classifies deep/light/awake from movement variance
//! - **Storage**: SQLite kv/history storage and TOML-based configuration
//! - **Clock injection**: all date-dependent logic takes a [`Clock`] so
//!   day, week and month boundaries are testable
//!
//! ## Key Components
//!
//! - [`ProgressionEngine`]: atomic wake-event transactions over [`ProgressionState`]
//! - [`SleepEpochTracker`]: epoch classification and the smart-wake decision
//! - [`Database`] / [`Config`]: local persistence
//! - [`Clock`]: injected time source

pub mod achievements;
pub mod alarm;
pub mod boss;
pub mod catalog;
pub mod character;
pub mod clock;
pub mod difficulty;
pub mod engine;
pub mod error;
pub mod profile;
pub mod sleep;
pub mod storage;
pub mod wake_proof;
pub mod wake_score;

pub use alarm::{Alarm, ChallengeType, Difficulty};
pub use boss::BossState;
pub use character::CharacterStats;
pub use clock::{week_of_year, Clock, FixedClock, SystemClock};
pub use engine::{
    DayStamp, DismissContext, DismissOutcome, PracticeOutcome, ProgressionEngine, ProgressionState,
};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use profile::{PlayerProfile, PlayerStats, SleepLogEntry};
pub use sleep::{should_trigger_smart_wake, EpochResult, SleepEpochTracker, SleepState};
pub use storage::{Config, Database};
pub use wake_proof::{WakeProofMonitor, WakeProofStatus};
pub use wake_score::{WakeProofOutcome, WakeScoreHistory, WakeScoreSummary};
