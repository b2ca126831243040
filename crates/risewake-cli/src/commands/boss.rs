use clap::Subcommand;
use risewake_core::catalog::WEEKLY_BOSSES;
use risewake_core::storage::Database;
use risewake_core::{ProgressionEngine, SystemClock};
use serde_json::json;

use super::{load_state, save_state};

#[derive(Subcommand)]
pub enum BossAction {
    /// Current boss fight status
    Status,
    /// The full boss rotation
    Rotation,
    /// Roll the boss over if a new week has started
    Reset,
}

pub fn run(action: BossAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut engine = ProgressionEngine::from_state(load_state(&db), SystemClock);

    match action {
        BossAction::Status => {
            let state = engine.state();
            let boss = state.boss.boss();
            let out = json!({
                "id": boss.id,
                "name": boss.name,
                "title": boss.title,
                "week": state.boss.week_number,
                "current_hp": state.boss.current_hp,
                "max_hp": state.boss.max_hp,
                "hp_fraction": state.boss.hp_fraction(),
                "weakness": boss.weakness.label(),
                "damage_dealt": state.boss.damage_dealt,
                "snooze_damage_taken": state.boss.snooze_damage_taken,
                "defeated": state.boss.defeated,
                "loot": { "coins": boss.loot.coins, "xp": boss.loot.xp },
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        BossAction::Rotation => {
            let rotation: Vec<_> = WEEKLY_BOSSES
                .iter()
                .map(|b| {
                    json!({
                        "id": b.id,
                        "name": b.name,
                        "max_hp": b.max_hp,
                        "weakness": b.weakness.label(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rotation)?);
        }
        BossAction::Reset => {
            let rolled = engine.reset_boss_if_new_week();
            save_state(&db, engine.state())?;
            println!("{}", json!({ "rolled_over": rolled }));
        }
    }
    Ok(())
}
