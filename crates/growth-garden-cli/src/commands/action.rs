use chrono::NaiveDate;
use clap::Subcommand;
use growth_garden_core::model::{NewAction, Reflection};
use growth_garden_core::Config;

use super::{api_client, block_on, print_json, CliResult};

#[derive(Subcommand)]
pub enum ActionAction {
    /// List actions
    List {
        /// Only actions of this goal
        #[arg(long)]
        goal: Option<String>,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Attach a new action to a goal
    Add {
        goal_id: String,
        title: String,
        /// XP awarded on completion
        #[arg(long, default_value_t = 10)]
        xp: u32,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Complete an action and water its goal
    Complete {
        id: String,
        /// How it felt (e.g. proud, tired)
        #[arg(long)]
        feeling: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// 1 (easy) to 5 (hard)
        #[arg(long)]
        difficulty: Option<u8>,
        /// 1 to 5
        #[arg(long)]
        satisfaction: Option<u8>,
    },
    /// Delete an action
    Delete {
        id: String,
    },
}

pub fn run(action: ActionAction) -> CliResult {
    let config = Config::load_or_default();
    let client = api_client(&config)?;

    match action {
        ActionAction::List { goal, json } => {
            let actions = block_on(client.list_actions(goal.as_deref()))??;
            if json {
                return print_json(&actions);
            }
            for a in &actions {
                let mark = if a.is_completed() { "x" } else { " " };
                let due = a
                    .due_date
                    .as_deref()
                    .map(|d| format!(" due {d}"))
                    .unwrap_or_default();
                println!("[{mark}] {} ({}) +{} XP{due}", a.title, a.id, a.xp_reward);
            }
        }
        ActionAction::Add {
            goal_id,
            title,
            xp,
            due,
        } => {
            let new_action = NewAction {
                goal_id,
                title,
                xp_reward: xp,
                due_date: due,
            };
            let created = block_on(client.create_action(&new_action))??;
            println!("Action added: {} ({})", created.title, created.id);
        }
        ActionAction::Complete {
            id,
            feeling,
            note,
            difficulty,
            satisfaction,
        } => {
            let reflection = Reflection {
                feeling,
                note,
                difficulty,
                satisfaction,
            };
            let reflection = (!reflection.is_empty()).then_some(reflection);
            let done = block_on(client.complete_action(&id, reflection.as_ref()))??;
            println!("Completed: {} (+{} XP)", done.title, done.xp_reward);
        }
        ActionAction::Delete { id } => {
            block_on(client.delete_action(&id))??;
            println!("Action deleted: {id}");
        }
    }
    Ok(())
}
