//! Wake-proof re-check state machine.
//!
//! After a dismissal the user can be re-checked a few minutes later to
//! prove they stayed up. A failed or missed check re-activates the alarm.
//! Resetting this state at any time never touches persisted progression.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WakeProofStatus {
    Idle,
    /// Countdown running; the check fires at the deadline.
    Pending,
    /// Deadline reached, waiting on the user's response.
    Checking,
    Passed,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakeProofMonitor {
    status: WakeProofStatus,
    deadline: Option<DateTime<Utc>>,
    alarm_id: Option<String>,
}

impl Default for WakeProofMonitor {
    fn default() -> Self {
        Self {
            status: WakeProofStatus::Idle,
            deadline: None,
            alarm_id: None,
        }
    }
}

impl WakeProofMonitor {
    pub fn status(&self) -> WakeProofStatus {
        self.status
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Arm the check `delay_min` minutes from now.
    pub fn start(&mut self, alarm_id: &str, delay_min: u32, now: DateTime<Utc>) {
        self.status = WakeProofStatus::Pending;
        self.deadline = Some(now + Duration::minutes(delay_min as i64));
        self.alarm_id = Some(alarm_id.to_string());
    }

    /// True once a pending deadline has elapsed.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == WakeProofStatus::Pending
            && self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Transition Pending -> Checking when the deadline fires.
    pub fn begin_check(&mut self) {
        if self.status == WakeProofStatus::Pending {
            self.status = WakeProofStatus::Checking;
        }
    }

    pub fn pass(&mut self) {
        self.status = WakeProofStatus::Passed;
        self.deadline = None;
        self.alarm_id = None;
    }

    /// Mark the check failed. Returns the alarm id to re-activate.
    pub fn fail(&mut self) -> Option<String> {
        self.status = WakeProofStatus::Failed;
        self.deadline = None;
        self.alarm_id.take()
    }

    /// Safe to call at any time; clears only the monitor itself.
    pub fn reset(&mut self) {
        *self = WakeProofMonitor::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        chrono::NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn pending_fires_after_delay() {
        let mut monitor = WakeProofMonitor::default();
        monitor.start("alarm-1", 5, now());
        assert_eq!(monitor.status(), WakeProofStatus::Pending);
        assert!(!monitor.is_due(now() + Duration::minutes(4)));
        assert!(monitor.is_due(now() + Duration::minutes(5)));

        monitor.begin_check();
        assert_eq!(monitor.status(), WakeProofStatus::Checking);
    }

    #[test]
    fn fail_returns_alarm_for_reactivation() {
        let mut monitor = WakeProofMonitor::default();
        monitor.start("alarm-1", 5, now());
        monitor.begin_check();
        assert_eq!(monitor.fail().as_deref(), Some("alarm-1"));
        assert_eq!(monitor.status(), WakeProofStatus::Failed);
    }

    #[test]
    fn reset_is_always_safe() {
        let mut monitor = WakeProofMonitor::default();
        monitor.reset();
        assert_eq!(monitor.status(), WakeProofStatus::Idle);

        monitor.start("alarm-1", 5, now());
        monitor.reset();
        assert_eq!(monitor.status(), WakeProofStatus::Idle);
        assert!(monitor.deadline().is_none());
    }
}
