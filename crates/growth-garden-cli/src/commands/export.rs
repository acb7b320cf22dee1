use clap::Args;
use growth_garden_core::export::default_file_name;
use growth_garden_core::{export_report, Config, ExportFormat, GrowthAnalyzer, ReportKind};
use std::path::PathBuf;

use super::{CliResult, SnapshotArgs};

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    source: SnapshotArgs,
    /// summary, detailed or analytics
    #[arg(long, default_value = "summary")]
    kind: ReportKind,
    /// csv or json
    #[arg(long, default_value = "csv")]
    format: ExportFormat,
    /// Write to this file; use `-` for stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Write to the suggested file name in the current directory
    #[arg(long, conflicts_with = "output")]
    save: bool,
}

pub fn run(args: ExportArgs) -> CliResult {
    let config = Config::load_or_default();
    let clock = args.source.clock()?;
    let snapshot = args.source.load(&config)?;
    let now = clock.now();

    let report = GrowthAnalyzer::with_trend_days(config.analytics.trend_days).analyze(
        &snapshot.goals,
        &snapshot.actions,
        now.date_naive(),
    );
    let rendered = export_report(args.kind, args.format, &report, now)?;

    let target = match (args.output, args.save) {
        (Some(path), _) if path.as_os_str() != "-" => Some(path),
        (None, true) => Some(PathBuf::from(default_file_name(
            args.kind,
            args.format,
            now.date_naive(),
        ))),
        _ => None,
    };

    match target {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
