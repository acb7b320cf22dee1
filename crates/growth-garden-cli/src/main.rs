use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable holding the log filter (e.g. `growth_garden_core=debug`).
const LOG_ENV_VAR: &str = "GROWTH_GARDEN_LOG";

#[derive(Parser)]
#[command(name = "growth-garden", version, about = "Growth Garden CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plant health and growth stage per goal
    Health(commands::health::HealthArgs),
    /// Garden-wide analytics
    Analytics(commands::analytics::AnalyticsArgs),
    /// Export a report as CSV or JSON
    Export(commands::export::ExportArgs),
    /// Goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Action management
    Action {
        #[command(subcommand)]
        action: commands::action::ActionAction,
    },
    /// Daily habits
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// AI weekly reflection reports
    Report {
        #[command(subcommand)]
        action: commands::report::ReportAction,
    },
    /// Sign in to the Growth Garden API
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Health(args) => commands::health::run(args),
        Commands::Analytics(args) => commands::analytics::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Action { action } => commands::action::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Report { action } => commands::report::run(action),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
