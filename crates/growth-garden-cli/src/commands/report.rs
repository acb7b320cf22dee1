use clap::Subcommand;
use growth_garden_core::model::WeeklyReport;
use growth_garden_core::Config;

use super::{api_client, block_on, print_json, CliResult};

#[derive(Subcommand)]
pub enum ReportAction {
    /// Generate this week's AI reflection
    Generate {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// List past reflections
    List {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_report(report: &WeeklyReport) {
    println!("Week {} - {}", report.week_start, report.week_end);
    println!("{}", report.summary);
    for insight in &report.insights {
        println!("  * {insight}");
    }
    for highlight in &report.highlights {
        println!("  + {highlight}");
    }
}

pub fn run(action: ReportAction) -> CliResult {
    let config = Config::load_or_default();
    let client = api_client(&config)?;

    match action {
        ReportAction::Generate { json } => {
            let report = block_on(client.generate_weekly_report())??;
            if json {
                return print_json(&report);
            }
            print_report(&report);
        }
        ReportAction::List { json } => {
            let reports = block_on(client.list_reports())??;
            if json {
                return print_json(&reports);
            }
            for report in &reports {
                print_report(report);
                println!();
            }
        }
    }
    Ok(())
}
