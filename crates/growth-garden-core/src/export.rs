//! Report export as CSV or JSON for download.
//!
//! CSV output is meant for spreadsheets, not for parsing back. Text fields
//! are double-quoted with embedded quotes doubled so names containing commas
//! survive.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;

use crate::analytics::{AnalyticsReport, GoalReport, GrowthAnalytics, TrendPoint};
use crate::error::Result;

pub const SUMMARY_HEADER: &str = "Metric,Value";
pub const DETAILED_HEADER: &str = "Goal,Plant Type,Level,Status,Actions,Completed Actions,\
Completion Rate (%),Total XP,Average XP,Days Active,Last Activity";
pub const TREND_HEADER: &str = "Date,Actions Created";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Summary,
    Detailed,
    Analytics,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Summary => "summary",
            ReportKind::Detailed => "detailed",
            ReportKind::Analytics => "analytics",
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(ReportKind::Summary),
            "detailed" => Ok(ReportKind::Detailed),
            "analytics" => Ok(ReportKind::Analytics),
            other => Err(format!(
                "unknown report kind '{other}' (expected summary, detailed or analytics)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{other}' (expected csv or json)")),
        }
    }
}

/// Suggested download name, e.g. `growth-garden-summary-2024-01-05.csv`.
pub fn default_file_name(kind: ReportKind, format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "growth-garden-{}-{}.{}",
        kind.as_str(),
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render `report` as the requested kind and format.
pub fn export_report(
    kind: ReportKind,
    format: ExportFormat,
    report: &AnalyticsReport,
    generated_at: DateTime<Utc>,
) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(match kind {
            ReportKind::Summary => summary_csv(&report.analytics),
            ReportKind::Detailed => detailed_csv(&report.goals),
            ReportKind::Analytics => analytics_csv(&report.analytics, &report.trend),
        }),
        ExportFormat::Json => {
            let generated_at = generated_at.to_rfc3339();
            let doc = match kind {
                ReportKind::Summary => json!({
                    "generated_at": generated_at,
                    "kind": kind,
                    "summary": report.analytics,
                }),
                ReportKind::Detailed => json!({
                    "generated_at": generated_at,
                    "kind": kind,
                    "goals": report.goals,
                }),
                ReportKind::Analytics => json!({
                    "generated_at": generated_at,
                    "kind": kind,
                    "summary": report.analytics,
                    "trend": report.trend,
                    "by_plant_type": report.by_plant_type,
                }),
            };
            Ok(serde_json::to_string_pretty(&doc)?)
        }
    }
}

/// `Metric,Value` table in fixed row order.
pub fn summary_csv(analytics: &GrowthAnalytics) -> String {
    let rows: [(&str, String); 11] = [
        ("Total Goals", analytics.total_goals.to_string()),
        ("Active Goals", analytics.active_goals.to_string()),
        ("Completed Goals", analytics.completed_goals.to_string()),
        ("Withered Goals", analytics.withered_goals.to_string()),
        ("Total Actions", analytics.total_actions.to_string()),
        ("Completed Actions", analytics.completed_actions.to_string()),
        ("Total XP", analytics.total_xp.to_string()),
        ("Average Goal Level", analytics.average_goal_level.to_string()),
        ("Completion Rate (%)", analytics.completion_rate.to_string()),
        ("Current Streak (days)", analytics.current_streak.to_string()),
        ("Longest Streak (days)", analytics.longest_streak.to_string()),
    ];

    let mut out = String::new();
    push_line(&mut out, SUMMARY_HEADER);
    for (metric, value) in rows {
        push_line(&mut out, &format!("{metric},{value}"));
    }
    out
}

/// One row per goal.
pub fn detailed_csv(goals: &[GoalReport]) -> String {
    let mut out = String::new();
    push_line(&mut out, DETAILED_HEADER);
    for g in goals {
        let last_activity = g
            .last_activity_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let line = format!(
            "{},{},{},{},{},{},{},{},{},{},{}",
            quote(&g.goal_name),
            quote(g.plant_type.as_str()),
            g.level,
            quote(g.status.as_str()),
            g.action_count,
            g.completed_action_count,
            g.completion_rate,
            g.total_xp,
            g.average_xp,
            g.days_active,
            last_activity,
        );
        push_line(&mut out, &line);
    }
    out
}

/// Summary table, a blank line, then the daily trend.
pub fn analytics_csv(analytics: &GrowthAnalytics, trend: &[TrendPoint]) -> String {
    let mut out = summary_csv(analytics);
    out.push('\n');
    push_line(&mut out, TREND_HEADER);
    for point in trend {
        push_line(&mut out, &format!("{},{}", point.date.format("%Y-%m-%d"), point.actions_created));
    }
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GoalStatus, PlantType};
    use chrono::TimeZone;

    fn analytics() -> GrowthAnalytics {
        GrowthAnalytics {
            total_goals: 3,
            active_goals: 2,
            completed_goals: 1,
            withered_goals: 0,
            total_actions: 10,
            completed_actions: 7,
            total_xp: 140,
            average_goal_level: 2.3,
            completion_rate: 70,
            current_streak: 4,
            longest_streak: 9,
        }
    }

    #[test]
    fn summary_csv_has_fixed_header_and_order() {
        let csv = summary_csv(&analytics());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Metric,Value");
        assert_eq!(lines[1], "Total Goals,3");
        assert_eq!(lines[7], "Total XP,140");
        assert_eq!(lines[8], "Average Goal Level,2.3");
        assert_eq!(lines[9], "Completion Rate (%),70");
        assert_eq!(lines[11], "Longest Streak (days),9");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn detailed_csv_quotes_text_fields() {
        let goal = GoalReport {
            goal_id: "g1".into(),
            goal_name: "Read, write \"daily\"".into(),
            plant_type: PlantType::Flower,
            level: 2,
            status: GoalStatus::Active,
            action_count: 4,
            completed_action_count: 1,
            total_xp: 15,
            average_xp: 15.0,
            completion_rate: 25,
            first_activity_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            last_activity_date: NaiveDate::from_ymd_opt(2024, 1, 3),
            days_active: 3,
        };
        let csv = detailed_csv(&[goal]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], DETAILED_HEADER);
        assert_eq!(
            lines[1],
            "\"Read, write \"\"daily\"\"\",\"flower\",2,\"active\",4,1,25,15,15,3,2024-01-03"
        );
    }

    #[test]
    fn analytics_csv_appends_trend_section() {
        let trend = vec![TrendPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            actions_created: 2,
        }];
        let csv = analytics_csv(&analytics(), &trend);
        assert!(csv.contains("\n\nDate,Actions Created\n2024-01-05,2\n"));
    }

    #[test]
    fn every_csv_line_is_newline_terminated() {
        let trend = vec![TrendPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            actions_created: 0,
        }];
        let csv = analytics_csv(&analytics(), &trend);
        assert!(csv.ends_with("2024-01-05,0\n"));
        // 12 summary lines, blank separator, trend header, one trend row
        assert_eq!(csv.matches('\n').count(), 15);
        assert_eq!(detailed_csv(&[]), format!("{DETAILED_HEADER}\n"));
    }

    #[test]
    fn json_export_nests_sections() {
        let report = AnalyticsReport {
            analytics: analytics(),
            ..Default::default()
        };
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let out = export_report(ReportKind::Summary, ExportFormat::Json, &report, at).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["kind"], "summary");
        assert_eq!(doc["summary"]["total_xp"], 140);
        assert!(doc.get("trend").is_none());
    }

    #[test]
    fn parses_kind_and_format() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("detailed".parse::<ReportKind>(), Ok(ReportKind::Detailed));
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(
            default_file_name(
                ReportKind::Analytics,
                ExportFormat::Json,
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
            ),
            "growth-garden-analytics-2024-01-05.json"
        );
    }
}
