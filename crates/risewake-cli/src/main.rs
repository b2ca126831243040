use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;

#[derive(Parser)]
#[command(name = "risewake-cli", version, about = "Risewake CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wake events: dismiss, snooze, proof, routine, grace
    Wake {
        #[command(subcommand)]
        action: commands::wake::WakeAction,
    },
    /// Progression and wake-score statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Weekly boss status and rotation
    Boss {
        #[command(subcommand)]
        action: commands::boss::BossAction,
    },
    /// Sleep tracking: motion samples, epochs, smart wake
    Sleep {
        #[command(subcommand)]
        action: commands::sleep::SleepAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Wake { action } => commands::wake::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Boss { action } => commands::boss::run(action),
        Commands::Sleep { action } => commands::sleep::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "risewake-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
