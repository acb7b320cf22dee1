use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use growth_garden_core::Config;

use super::{api_client, block_on, print_json, CliResult};

#[derive(Subcommand)]
pub enum HabitAction {
    /// List habits with their streaks
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Log a habit for a day (defaults to today)
    Log {
        id: String,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        note: Option<String>,
    },
}

pub fn run(action: HabitAction) -> CliResult {
    let config = Config::load_or_default();
    let client = api_client(&config)?;
    let today = Utc::now().date_naive();

    match action {
        HabitAction::List { json } => {
            let habits = block_on(client.list_habits())??;
            if json {
                return print_json(&habits);
            }
            for h in &habits {
                let streak = h.streak(today);
                let done = if h.is_logged_on(today) { "x" } else { " " };
                println!(
                    "[{done}] {} ({}) streak {} / best {}",
                    h.name, h.id, streak.current, streak.longest
                );
            }
        }
        HabitAction::Log { id, date, note } => {
            let date = date.unwrap_or(today);
            let habit = block_on(client.log_habit(&id, date, note.as_deref()))??;
            println!(
                "Logged {} for {date} (streak {})",
                habit.name,
                habit.streak(today).current
            );
        }
    }
    Ok(())
}
