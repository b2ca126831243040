//! TOML-based application configuration.
//!
//! Stores the default alarm settings, smart-wake options and reward
//! parameters. Configuration is stored at `~/.config/risewake/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::alarm::{ChallengeType, Difficulty};

/// Default alarm settings applied to newly created alarms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmDefaults {
    #[serde(default = "default_hour")]
    pub hour: u32,
    #[serde(default)]
    pub minute: u32,
    #[serde(default = "default_challenges")]
    pub challenges: Vec<ChallengeType>,
    #[serde(default = "default_challenge_count")]
    pub challenge_count: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default = "default_snooze_limit")]
    pub snooze_limit: u32,
    #[serde(default = "default_true")]
    pub wake_proof_enabled: bool,
    #[serde(default = "default_wake_proof_delay")]
    pub wake_proof_delay_min: u32,
    #[serde(default = "default_routine")]
    pub morning_routine: Vec<String>,
}

/// Smart-wake (early trigger) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartWakeConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_smart_wake_window")]
    pub window_minutes: u32,
}

/// Reward parameters fed into progression transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// External premium-tier coin multiplier; opaque to the engine.
    #[serde(default = "default_multiplier")]
    pub reward_multiplier: f64,
    #[serde(default = "default_grace_tokens")]
    pub grace_tokens_per_month: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/risewake/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alarm: AlarmDefaults,
    #[serde(default)]
    pub smart_wake: SmartWakeConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
}

// Default functions
fn default_hour() -> u32 {
    7
}
fn default_challenges() -> Vec<ChallengeType> {
    vec![ChallengeType::Math, ChallengeType::Trivia]
}
fn default_challenge_count() -> u32 {
    2
}
fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}
fn default_snooze_limit() -> u32 {
    2
}
fn default_true() -> bool {
    true
}
fn default_wake_proof_delay() -> u32 {
    5
}
fn default_routine() -> Vec<String> {
    vec!["water".to_string(), "stretch".to_string()]
}
fn default_smart_wake_window() -> u32 {
    30
}
fn default_multiplier() -> f64 {
    1.0
}
fn default_grace_tokens() -> u32 {
    1
}

impl Default for AlarmDefaults {
    fn default() -> Self {
        Self {
            hour: default_hour(),
            minute: 0,
            challenges: default_challenges(),
            challenge_count: default_challenge_count(),
            difficulty: default_difficulty(),
            snooze_limit: default_snooze_limit(),
            wake_proof_enabled: true,
            wake_proof_delay_min: default_wake_proof_delay(),
            morning_routine: default_routine(),
        }
    }
}

impl Default for SmartWakeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window_minutes: default_smart_wake_window(),
        }
    }
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            reward_multiplier: default_multiplier(),
            grace_tokens_per_month: default_grace_tokens(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alarm: AlarmDefaults::default(),
            smart_wake: SmartWakeConfig::default(),
            rewards: RewardsConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err("config key is empty".into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| format!("cannot parse '{value}' as number"))?
                        } else {
                            return Err(format!("cannot parse '{value}' as number").into());
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value)?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| format!("unknown config key: {key}"))?;
        }

        Err(format!("unknown config key: {key}").into())
    }

    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Get a config value by dotted key (e.g. `"rewards.reward_multiplier"`).
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Returns error if key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
