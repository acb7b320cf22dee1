use clap::Args;
use growth_garden_core::analytics::MAX_TREND_DAYS;
use growth_garden_core::{AnalyticsReport, Config, GrowthAnalyzer, Streak};
use serde::Serialize;

use super::{print_json, CliResult, SnapshotArgs};

#[derive(Args)]
pub struct AnalyticsArgs {
    #[command(flatten)]
    source: SnapshotArgs,
    /// Days in the activity trend window (defaults to analytics.trend_days)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_TREND_DAYS)))]
    trend_days: Option<u32>,
}

#[derive(Serialize)]
struct HabitStreak {
    habit_id: String,
    name: String,
    streak: Streak,
}

#[derive(Serialize)]
struct AnalyticsOutput {
    #[serde(flatten)]
    report: AnalyticsReport,
    habits: Vec<HabitStreak>,
}

pub fn run(args: AnalyticsArgs) -> CliResult {
    let config = Config::load_or_default();
    let clock = args.source.clock()?;
    let snapshot = args.source.load(&config)?;
    let today = clock.today();

    let analyzer = GrowthAnalyzer::with_trend_days(args.trend_days.unwrap_or(config.analytics.trend_days));
    let report = analyzer.analyze(&snapshot.goals, &snapshot.actions, today);
    let habits = snapshot
        .habits
        .iter()
        .map(|h| HabitStreak {
            habit_id: h.id.clone(),
            name: h.name.clone(),
            streak: h.streak(today),
        })
        .collect();

    print_json(&AnalyticsOutput { report, habits })
}
