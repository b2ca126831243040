//! Alarm configuration types consumed from the presentation layer.
//!
//! The core never schedules or rings alarms itself; it receives the
//! relevant settings (challenge list, snooze limit, wake-proof and
//! smart-wake options, routine task ids) alongside each wake event.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Dismissal challenge kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeType {
    Math,
    Trivia,
    Shake,
    Memory,
    Typing,
    Steps,
}

impl ChallengeType {
    /// Every challenge kind, in display order.
    pub const ALL: [ChallengeType; 6] = [
        ChallengeType::Math,
        ChallengeType::Trivia,
        ChallengeType::Shake,
        ChallengeType::Memory,
        ChallengeType::Typing,
        ChallengeType::Steps,
    ];

    /// Challenges that require physical movement (feeds the energy stat).
    pub fn is_physical(&self) -> bool {
        matches!(self, ChallengeType::Shake | ChallengeType::Steps)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChallengeType::Math => "math",
            ChallengeType::Trivia => "trivia",
            ChallengeType::Shake => "shake",
            ChallengeType::Memory => "memory",
            ChallengeType::Typing => "typing",
            ChallengeType::Steps => "steps",
        }
    }
}

impl std::str::FromStr for ChallengeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "math" => Ok(ChallengeType::Math),
            "trivia" => Ok(ChallengeType::Trivia),
            "shake" => Ok(ChallengeType::Shake),
            "memory" => Ok(ChallengeType::Memory),
            "typing" => Ok(ChallengeType::Typing),
            "steps" => Ok(ChallengeType::Steps),
            other => Err(format!("unknown challenge type: {other}")),
        }
    }
}

/// Challenge difficulty tier. `Viking` is a user-selectable extreme tier;
/// the adaptive recommender only ever suggests up to `Hard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Viking,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Viking => "viking",
        }
    }
}

/// A configured alarm, as handed over by the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alarm {
    pub id: String,
    pub hour: u32,
    pub minute: u32,
    #[serde(default)]
    pub label: String,
    pub enabled: bool,
    /// Active weekdays, Sunday first.
    pub days: [bool; 7],
    pub challenges: Vec<ChallengeType>,
    pub challenge_count: u32,
    pub difficulty: Difficulty,
    /// Maximum snoozes allowed (0 = none).
    pub snooze_limit: u32,
    pub vibrate: bool,
    pub sound: String,
    /// Post-dismissal re-check: prove you stayed up.
    pub wake_proof_enabled: bool,
    /// Minutes after dismissal before the wake-proof check fires.
    pub wake_proof_delay_min: u32,
    /// Routine task ids attached to this alarm.
    pub morning_routine: Vec<String>,
    pub smart_wake_enabled: bool,
    /// Minutes before the target time during which an early trigger is allowed.
    pub smart_wake_window_min: u32,
}

impl Alarm {
    /// Create an alarm with sensible weekday defaults at the given time.
    pub fn default_at(hour: u32, minute: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            hour,
            minute,
            label: String::new(),
            enabled: true,
            days: [false, true, true, true, true, true, false],
            challenges: vec![ChallengeType::Math, ChallengeType::Trivia],
            challenge_count: 2,
            difficulty: Difficulty::Medium,
            snooze_limit: 2,
            vibrate: true,
            sound: "horn".into(),
            wake_proof_enabled: true,
            wake_proof_delay_min: 5,
            morning_routine: vec!["water".into(), "stretch".into()],
            smart_wake_enabled: false,
            smart_wake_window_min: 30,
        }
    }

    /// Target time as minutes since midnight.
    pub fn target_minute(&self) -> u32 {
        self.hour * 60 + self.minute
    }

    /// Active weekdays rendered as short names, e.g. `"Mon, Tue, Fri"`.
    pub fn days_label(&self) -> String {
        let names: Vec<&str> = DAY_NAMES
            .iter()
            .zip(self.days)
            .filter(|(_, active)| *active)
            .map(|(name, _)| *name)
            .collect();
        if names.len() == 7 {
            "Every day".into()
        } else {
            names.join(", ")
        }
    }
}

/// Format an alarm time as `h:mm AM/PM`.
pub fn format_time(hour: u32, minute: u32) -> String {
    let h = if hour % 12 == 0 { 12 } else { hour % 12 };
    let ampm = if hour < 12 { "AM" } else { "PM" };
    format!("{}:{:02} {}", h, minute, ampm)
}

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_alarm_is_weekdays_only() {
        let alarm = Alarm::default_at(7, 0);
        assert!(!alarm.days[0]);
        assert!(alarm.days[1]);
        assert!(!alarm.days[6]);
        assert_eq!(alarm.target_minute(), 420);
    }

    #[test]
    fn challenge_parses_from_label() {
        for c in ChallengeType::ALL {
            assert_eq!(c.label().parse::<ChallengeType>().unwrap(), c);
        }
        assert!("yoga".parse::<ChallengeType>().is_err());
    }

    #[test]
    fn physical_challenges() {
        assert!(ChallengeType::Shake.is_physical());
        assert!(ChallengeType::Steps.is_physical());
        assert!(!ChallengeType::Math.is_physical());
        assert_eq!(
            ChallengeType::ALL.iter().filter(|c| c.is_physical()).count(),
            2
        );
    }

    #[test]
    fn days_render_as_short_names() {
        let mut alarm = Alarm::default_at(7, 0);
        assert_eq!(alarm.days_label(), "Mon, Tue, Wed, Thu, Fri");
        alarm.days = [true; 7];
        assert_eq!(alarm.days_label(), "Every day");
        alarm.days = [false; 7];
        assert_eq!(alarm.days_label(), "");
    }

    #[test]
    fn time_formatting() {
        assert_eq!(format_time(0, 5), "12:05 AM");
        assert_eq!(format_time(7, 0), "7:00 AM");
        assert_eq!(format_time(12, 30), "12:30 PM");
        assert_eq!(format_time(23, 59), "11:59 PM");
    }
}
