use clap::Subcommand;
use risewake_core::storage::Database;
use risewake_core::{
    ChallengeType, Clock, Config, DismissContext, ProgressionEngine, SystemClock, WakeProofMonitor,
};
use serde_json::json;

use super::{load_state, save_state};

const PROOF_MONITOR_KEY: &str = "wake_proof_monitor";

#[derive(Subcommand)]
pub enum WakeAction {
    /// Dismiss an alarm after completing a challenge
    Dismiss {
        /// Completed challenge type (math, trivia, shake, memory, typing, steps)
        challenge: String,
        /// Snoozes used before dismissing
        #[arg(long, default_value = "0")]
        snoozes: u32,
        /// Snooze limit of the dismissed alarm
        #[arg(long, default_value = "2")]
        snooze_limit: u32,
        /// Whether the alarm has wake proof enabled
        #[arg(long)]
        wake_proof: bool,
        /// Routine task ids attached to the alarm (repeatable)
        #[arg(long = "routine")]
        routine: Vec<String>,
        /// JSON alarm definition; overrides the flags above
        #[arg(long)]
        alarm_file: Option<std::path::PathBuf>,
    },
    /// Record a snooze
    Snooze,
    /// Arm the wake-proof re-check after a dismissal
    ProofStart {
        /// Alarm id the check belongs to
        alarm_id: String,
        /// Minutes from now until the check fires
        #[arg(long, default_value = "5")]
        delay: u32,
    },
    /// Poll the wake-proof monitor; transitions to checking when due
    ProofStatus,
    /// Record a wake-proof check result
    Proof {
        /// Whether the user was still up when the check fired
        #[arg(long)]
        passed: bool,
    },
    /// Complete a morning-routine task
    Routine {
        /// Task id (e.g. "water", "stretch")
        task_id: String,
    },
    /// List the routine task catalog
    Routines,
    /// Spend a grace token to shield the streak
    Grace,
    /// Practice a challenge outside an alarm
    Practice {
        /// Challenge type
        challenge: String,
        /// Whether the attempt succeeded
        #[arg(long)]
        success: bool,
    },
}

fn load_monitor(db: &Database) -> WakeProofMonitor {
    if let Ok(Some(json)) = db.kv_get(PROOF_MONITOR_KEY) {
        if let Ok(monitor) = serde_json::from_str::<WakeProofMonitor>(&json) {
            return monitor;
        }
    }
    WakeProofMonitor::default()
}

fn save_monitor(db: &Database, monitor: &WakeProofMonitor) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(monitor)?;
    db.kv_set(PROOF_MONITOR_KEY, &json)?;
    Ok(())
}

pub fn run(action: WakeAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut engine = ProgressionEngine::from_state(load_state(&db), SystemClock);

    match action {
        WakeAction::Dismiss {
            challenge,
            snoozes,
            snooze_limit,
            wake_proof,
            routine,
            alarm_file,
        } => {
            let challenge: ChallengeType = challenge.parse()?;
            let config = Config::load_or_default();
            let (ctx, alarm_summary) = match alarm_file {
                Some(path) => {
                    let alarm: risewake_core::Alarm =
                        serde_json::from_str(&std::fs::read_to_string(path)?)?;
                    let summary = json!({
                        "id": alarm.id,
                        "time": risewake_core::alarm::format_time(alarm.hour, alarm.minute),
                        "days": alarm.days_label(),
                    });
                    (
                        DismissContext::from_alarm(&alarm, config.rewards.reward_multiplier),
                        Some(summary),
                    )
                }
                None => (
                    DismissContext {
                        snooze_limit,
                        wake_proof_enabled: wake_proof,
                        routine_task_ids: routine,
                        reward_multiplier: config.rewards.reward_multiplier,
                    },
                    None,
                ),
            };
            let outcome = engine.dismiss_alarm(challenge, snoozes, &ctx);
            db.record_wake_event(
                engine.clock().today(),
                challenge.label(),
                snoozes,
                outcome.xp_earned,
                outcome.coins_earned,
                outcome.wake_score,
            )?;
            let out = json!({
                "alarm": alarm_summary,
                "xp_earned": outcome.xp_earned,
                "coins_earned": outcome.coins_earned,
                "streak": outcome.streak,
                "wake_score": outcome.wake_score,
                "leveled_up": outcome.leveled_up,
                "boss_defeated": outcome.boss_defeated,
                "new_achievements": outcome
                    .new_achievements
                    .iter()
                    .map(|a| a.id)
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        WakeAction::Snooze => {
            let damage = engine.snooze_alarm();
            println!("{}", json!({ "boss_scoreboard_damage": damage }));
        }
        WakeAction::ProofStart { alarm_id, delay } => {
            let mut monitor = load_monitor(&db);
            monitor.start(&alarm_id, delay, SystemClock.now());
            save_monitor(&db, &monitor)?;
            println!(
                "{}",
                json!({ "status": "pending", "deadline": monitor.deadline() })
            );
        }
        WakeAction::ProofStatus => {
            let mut monitor = load_monitor(&db);
            if monitor.is_due(SystemClock.now()) {
                monitor.begin_check();
                save_monitor(&db, &monitor)?;
            }
            println!("{}", serde_json::to_string_pretty(&monitor.status())?);
        }
        WakeAction::Proof { passed } => {
            let mut monitor = load_monitor(&db);
            let reactivate = if passed {
                monitor.pass();
                None
            } else {
                monitor.fail()
            };
            save_monitor(&db, &monitor)?;
            engine.record_wake_proof_result(passed);
            println!(
                "{}",
                json!({ "passed": passed, "reactivate_alarm": reactivate })
            );
        }
        WakeAction::Routine { task_id } => {
            let first = engine.complete_routine_task(&task_id);
            println!("{}", json!({ "task": task_id, "completed": first }));
        }
        WakeAction::Routines => {
            let tasks: Vec<_> = risewake_core::catalog::ROUTINE_TASKS
                .iter()
                .map(|t| json!({ "id": t.id, "label": t.label, "duration_min": t.duration_min }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        WakeAction::Grace => {
            let config = Config::load_or_default();
            let used = engine.use_grace_token(config.rewards.grace_tokens_per_month);
            if used {
                println!("{}", json!({ "grace_token_used": true }));
            } else {
                eprintln!("no grace token available this month");
                std::process::exit(1);
            }
        }
        WakeAction::Practice { challenge, success } => {
            let challenge: ChallengeType = challenge.parse()?;
            match engine.practice_challenge(challenge, success) {
                Some(outcome) => println!(
                    "{}",
                    json!({
                        "xp_earned": outcome.xp_earned,
                        "coins_earned": outcome.coins_earned,
                        "leveled_up": outcome.leveled_up,
                    })
                ),
                None => println!("{}", json!({ "xp_earned": 0, "coins_earned": 0 })),
            }
        }
    }

    save_state(&db, engine.state())?;
    Ok(())
}
