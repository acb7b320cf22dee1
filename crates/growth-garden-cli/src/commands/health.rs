use clap::Args;
use growth_garden_core::growth::{growth_stage, stage_label};
use growth_garden_core::{Config, GoalStatus, HealthStatus, PlantType, TreeHealth};
use serde::Serialize;

use super::{print_json, CliResult, SnapshotArgs};

#[derive(Args)]
pub struct HealthArgs {
    #[command(flatten)]
    source: SnapshotArgs,
    /// Only show this goal
    #[arg(long)]
    goal: Option<String>,
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PlantRow {
    goal_id: String,
    name: String,
    plant_type: PlantType,
    level: u32,
    status: GoalStatus,
    stage: &'static str,
    stage_label: &'static str,
    health: TreeHealth,
}

pub fn run(args: HealthArgs) -> CliResult {
    let config = Config::load_or_default();
    let clock = args.source.clock()?;
    let snapshot = args.source.load(&config)?;
    let now = clock.now();

    let rows: Vec<PlantRow> = snapshot
        .goals
        .iter()
        .filter(|g| args.goal.as_deref().map_or(true, |id| g.id == id))
        .map(|g| PlantRow {
            goal_id: g.id.clone(),
            name: g.name.clone(),
            plant_type: g.plant_type,
            level: g.current_level,
            status: g.status,
            stage: growth_stage(g.plant_type, g.current_level, g.status),
            stage_label: stage_label(g.plant_type, g.current_level, g.status),
            health: TreeHealth::for_goal(g, now),
        })
        .collect();

    if let Some(id) = &args.goal {
        if rows.is_empty() {
            return Err(format!("goal not found: {id}").into());
        }
    }

    if args.json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("Your garden is empty. Plant a goal with `growth-garden goal create`.");
        return Ok(());
    }

    for row in &rows {
        let countdown = match row.health.status {
            HealthStatus::Healthy => format!("{:.0}h until thirsty", row.health.hours_until_warning),
            HealthStatus::Warning => format!("{:.0}h until withered", row.health.hours_until_death),
            HealthStatus::Withered => "needs replanting".to_string(),
        };
        println!(
            "{} {} [{}] Lv.{} {} - {} ({} days since watered, {})",
            row.stage,
            row.name,
            row.goal_id,
            row.level,
            row.stage_label,
            row.health.status.description(),
            row.health.days_since_watered,
            countdown,
        );
    }
    Ok(())
}
