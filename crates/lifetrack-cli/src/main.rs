use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "lifetrack-cli", version, about = "Lifetrack layout and scoring CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Point scoring
    Score {
        #[command(subcommand)]
        action: commands::score::ScoreAction,
    },
    /// Daily streak
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Day view layout
    Layout {
        #[command(subcommand)]
        action: commands::layout::LayoutAction,
    },
    /// Range reports for dashboards
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Goal and project multipliers
    Multiplier {
        #[command(subcommand)]
        action: commands::multiplier::MultiplierAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Score { action } => commands::score::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Layout { action } => commands::layout::run(action),
        Commands::Report { action } => commands::report::run(action),
        Commands::Multiplier { action } => commands::multiplier::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
