use clap::Subcommand;
use risewake_core::alarm::format_time;
use risewake_core::catalog::{title_for_level, xp_for_next_level, ACHIEVEMENTS};
use risewake_core::storage::Database;
use risewake_core::{Clock, SystemClock};
use serde_json::json;

use super::load_state;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Player profile: level, XP, coins, streak
    Profile,
    /// Wake-score summary (today / week / all-time)
    Score,
    /// Unlocked achievements
    Achievements,
    /// Derived character attributes
    Character,
    /// Recent wake events
    History {
        /// Number of events to show
        #[arg(long, default_value = "10")]
        limit: u32,
    },
    /// Adaptive difficulty recommendation
    Difficulty,
    /// Export the progression snapshot as JSON
    Export {
        /// Output file path (stdout if omitted)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Import a previously exported snapshot
    Import {
        /// Input file path
        path: std::path::PathBuf,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let state = load_state(&db);

    match action {
        StatsAction::Profile => {
            let p = &state.profile;
            let avg_wake = state
                .stats
                .average_wake_minutes()
                .map(|m| format_time(m / 60, m % 60));
            let out = json!({
                "level": p.level,
                "title": title_for_level(p.level),
                "xp": p.xp,
                "xp_for_next_level": xp_for_next_level(p.level),
                "coins": p.coins,
                "current_streak": p.current_streak,
                "longest_streak": p.longest_streak,
                "grace_token_available": p.grace_token_available,
                "total_dismissals": state.stats.total_dismissals,
                "total_snoozes": state.stats.total_snoozes,
                "average_wake_time": avg_wake,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Score => {
            let summary = state.wake_score_summary(SystemClock.today());
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Achievements => {
            let unlocked: Vec<_> = ACHIEVEMENTS
                .iter()
                .filter(|a| state.unlocked.contains(a.id))
                .map(|a| json!({ "id": a.id, "name": a.name, "description": a.description }))
                .collect();
            let out = json!({
                "unlocked": unlocked,
                "total": ACHIEVEMENTS.len(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Character => {
            println!("{}", serde_json::to_string_pretty(&state.character)?);
        }
        StatsAction::History { limit } => {
            let events = db.recent_wake_events(limit)?;
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
        StatsAction::Difficulty => {
            let rec = state.difficulty.recommendation();
            let out = json!({
                "recommended": rec.label(),
                "success_rate": state.difficulty.success_rate(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        StatsAction::Export { out } => match out {
            Some(path) => {
                state.save_to_file(&path)?;
                println!("exported to {}", path.display());
            }
            None => println!("{}", state.to_json()?),
        },
        StatsAction::Import { path } => {
            let imported = risewake_core::ProgressionState::load_from_file(&path)?;
            super::save_state(&db, &imported)?;
            println!("imported snapshot (level {})", imported.profile.level);
        }
    }
    Ok(())
}
