use clap::Subcommand;
use risewake_core::sleep::{should_trigger_smart_wake, SleepEpochTracker, SleepState};
use risewake_core::storage::{Database, SLEEP_TRACKER_KEY};
use risewake_core::{Clock, SystemClock};
use serde_json::json;

#[derive(Subcommand)]
pub enum SleepAction {
    /// Start a new tracking session
    Start,
    /// Feed one accelerometer reading (m/s^2)
    Sample { x: f64, y: f64, z: f64 },
    /// Evaluate the current epoch if it is complete
    Evaluate,
    /// Session status: epochs evaluated, light-sleep ratio
    Status,
    /// Should the alarm fire early right now?
    SmartWake {
        /// Latest classified state (deep, light, awake, unknown)
        state: String,
        /// Minutes until the alarm's target time (negative = past it)
        #[arg(long)]
        minutes_until_target: i64,
        /// Pre-alarm window size in minutes
        #[arg(long, default_value = "30")]
        window: i64,
    },
    /// Discard the tracking session
    Reset,
}

fn load_tracker(db: &Database) -> SleepEpochTracker {
    if let Ok(Some(json)) = db.kv_get(SLEEP_TRACKER_KEY) {
        if let Ok(tracker) = serde_json::from_str::<SleepEpochTracker>(&json) {
            return tracker;
        }
    }
    SleepEpochTracker::new(SystemClock.now())
}

fn save_tracker(
    db: &Database,
    tracker: &SleepEpochTracker,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(tracker)?;
    db.kv_set(SLEEP_TRACKER_KEY, &json)?;
    Ok(())
}

fn parse_state(s: &str) -> Result<SleepState, Box<dyn std::error::Error>> {
    match s {
        "deep" => Ok(SleepState::Deep),
        "light" => Ok(SleepState::Light),
        "awake" => Ok(SleepState::Awake),
        "unknown" => Ok(SleepState::Unknown),
        other => Err(format!("unknown sleep state: {other}").into()),
    }
}

pub fn run(action: SleepAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let now = SystemClock.now();

    match action {
        SleepAction::Start => {
            let tracker = SleepEpochTracker::new(now);
            save_tracker(&db, &tracker)?;
            println!("{}", json!({ "started": true }));
        }
        SleepAction::Sample { x, y, z } => {
            let mut tracker = load_tracker(&db);
            tracker.add_sample(x, y, z);
            save_tracker(&db, &tracker)?;
            println!(
                "{}",
                json!({
                    "buffered": tracker.sample_count(),
                    "epoch_complete": tracker.is_epoch_complete(now),
                })
            );
        }
        SleepAction::Evaluate => {
            let mut tracker = load_tracker(&db);
            if !tracker.is_epoch_complete(now) {
                println!("{}", json!({ "epoch_complete": false }));
                return Ok(());
            }
            let result = tracker.evaluate_epoch(now);
            save_tracker(&db, &tracker)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        SleepAction::Status => {
            let tracker = load_tracker(&db);
            let out = json!({
                "total_epochs": tracker.total_epochs(),
                "light_sleep_ratio": tracker.light_sleep_ratio(),
                "buffered_samples": tracker.sample_count(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        SleepAction::SmartWake {
            state,
            minutes_until_target,
            window,
        } => {
            let state = parse_state(&state)?;
            let trigger = should_trigger_smart_wake(state, minutes_until_target, window);
            println!("{}", json!({ "trigger": trigger }));
        }
        SleepAction::Reset => {
            let mut tracker = load_tracker(&db);
            tracker.reset(now);
            save_tracker(&db, &tracker)?;
            println!("{}", json!({ "reset": true }));
        }
    }
    Ok(())
}
