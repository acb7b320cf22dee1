use clap::Subcommand;
use growth_garden_core::growth::growth_stage;
use growth_garden_core::model::{GoalUpdate, NewGoal};
use growth_garden_core::{Config, GoalStatus, PlantType};

use super::{api_client, block_on, print_json, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// List goals
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a goal
    Show {
        id: String,
    },
    /// Plant a new goal
    Create {
        name: String,
        /// sprout, herb, tree or flower
        #[arg(long, default_value = "sprout")]
        plant: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a goal
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// active, completed or withered
        #[arg(long)]
        status: Option<GoalStatus>,
    },
    /// Delete a goal and its actions
    Delete {
        id: String,
    },
}

pub fn run(action: GoalAction) -> CliResult {
    let config = Config::load_or_default();
    let client = api_client(&config)?;

    match action {
        GoalAction::List { json } => {
            let goals = block_on(client.list_goals())??;
            if json {
                return print_json(&goals);
            }
            for g in &goals {
                println!(
                    "{} {} [{}] Lv.{} {}/{} XP ({})",
                    growth_stage(g.plant_type, g.current_level, g.status),
                    g.name,
                    g.id,
                    g.current_level,
                    g.current_xp,
                    g.max_xp,
                    g.status,
                );
            }
        }
        GoalAction::Show { id } => {
            let goal = block_on(client.get_goal(&id))??;
            print_json(&goal)?;
        }
        GoalAction::Create {
            name,
            plant,
            description,
        } => {
            let new_goal = NewGoal {
                name,
                plant_type: PlantType::from_str_lossy(&plant),
                description,
            };
            let goal = block_on(client.create_goal(&new_goal))??;
            println!("Goal planted: {} ({})", goal.name, goal.id);
        }
        GoalAction::Update {
            id,
            name,
            description,
            status,
        } => {
            let update = GoalUpdate {
                name,
                description,
                plant_type: None,
                status,
            };
            let goal = block_on(client.update_goal(&id, &update))??;
            println!("Goal updated: {} ({})", goal.name, goal.id);
        }
        GoalAction::Delete { id } => {
            block_on(client.delete_goal(&id))??;
            println!("Goal deleted: {id}");
        }
    }
    Ok(())
}
