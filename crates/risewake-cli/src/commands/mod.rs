pub mod boss;
pub mod config;
pub mod sleep;
pub mod stats;
pub mod wake;

use risewake_core::storage::{Database, PROGRESSION_KEY};
use risewake_core::{week_of_year, Clock, ProgressionState, SystemClock};

/// Load the persisted progression snapshot, falling back to a fresh one
/// seeded with the current week's boss.
pub(crate) fn load_state(db: &Database) -> ProgressionState {
    if let Ok(Some(json)) = db.kv_get(PROGRESSION_KEY) {
        if let Ok(state) = serde_json::from_str::<ProgressionState>(&json) {
            return state;
        }
    }
    ProgressionState::new(week_of_year(SystemClock.today()))
}

pub(crate) fn save_state(
    db: &Database,
    state: &ProgressionState,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(state)?;
    db.kv_set(PROGRESSION_KEY, &json)?;
    Ok(())
}
