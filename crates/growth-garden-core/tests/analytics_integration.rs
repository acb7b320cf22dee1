//! Integration tests for the analytics pipeline.
//!
//! Tests the full workflow from an API-shaped snapshot to analytics,
//! per-goal reports and exported CSV/JSON.

use chrono::{NaiveDate, TimeZone, Utc};
use growth_garden_core::analytics::action_streak;
use growth_garden_core::export::{DETAILED_HEADER, SUMMARY_HEADER};
use growth_garden_core::{export_report, ExportFormat, GrowthAnalyzer, ReportKind, Snapshot};

fn snapshot() -> Snapshot {
    serde_json::from_value(serde_json::json!({
        "goals": [
            {
                "id": "g1", "name": "Run a marathon", "plant_type": "tree",
                "current_level": 3, "current_xp": 40, "max_xp": 100,
                "status": "active", "last_watered": "2024-01-05T07:00:00Z"
            },
            {
                "id": "g2", "name": "Learn Korean, slowly", "plant_type": "flower",
                "current_level": 1, "status": "withered", "last_watered": null
            },
            {
                "id": "g3", "name": "Empty plot", "plant_type": "mystery",
                "current_level": 0, "status": "completed"
            }
        ],
        "actions": [
            { "id": "a1", "goal_id": "g1", "title": "5k", "status": "completed", "xp_reward": 10,
              "created_at": "2024-01-01T06:00:00Z", "completed_at": "2024-01-01T07:00:00Z" },
            { "id": "a2", "goal_id": "g1", "title": "8k", "status": "completed", "xp_reward": 15,
              "created_at": "2024-01-01T06:05:00Z", "completed_at": "2024-01-02T07:00:00Z" },
            { "id": "a3", "goal_id": "g1", "title": "10k", "status": "completed", "xp_reward": 20,
              "created_at": "2024-01-02T06:00:00Z", "completed_at": "2024-01-03T07:00:00Z" },
            { "id": "a4", "goal_id": "g2", "title": "Hangul", "status": "completed", "xp_reward": 5,
              "created_at": "2024-01-03T06:00:00Z", "completed_at": "2024-01-05T21:00:00Z",
              "feeling": "curious", "difficulty": 2, "satisfaction": 4 },
            { "id": "a5", "goal_id": "g1", "title": "Half", "status": "pending", "xp_reward": 50,
              "created_at": "2024-01-04T06:00:00Z" }
        ]
    }))
    .unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

#[test]
fn streak_examples() {
    let snap = snapshot();

    let stale = action_streak(&snap.actions, day(20));
    assert_eq!((stale.current, stale.longest), (0, 3));

    let today = action_streak(&snap.actions, day(5));
    assert_eq!((today.current, today.longest), (1, 3));

    let yesterday = action_streak(&snap.actions, day(6));
    assert_eq!(yesterday.current, 1);
}

#[test]
fn full_report() {
    let snap = snapshot();
    let report = GrowthAnalyzer::with_trend_days(7).analyze(&snap.goals, &snap.actions, day(5));

    let a = &report.analytics;
    assert_eq!(a.total_goals, 3);
    assert_eq!((a.active_goals, a.completed_goals, a.withered_goals), (1, 1, 1));
    assert_eq!((a.total_actions, a.completed_actions), (5, 4));
    assert_eq!(a.total_xp, 50);
    assert_eq!(a.average_goal_level, 1.3);
    assert_eq!(a.completion_rate, 80);
    assert_eq!((a.current_streak, a.longest_streak), (1, 3));

    let g1 = &report.goals[0];
    assert_eq!(g1.action_count, 4);
    assert_eq!(g1.completed_action_count, 3);
    assert_eq!(g1.total_xp, 45);
    assert_eq!(g1.average_xp, 15.0);
    assert_eq!(g1.completion_rate, 75);
    assert_eq!(g1.first_activity_date, Some(day(1)));
    assert_eq!(g1.last_activity_date, Some(day(4)));
    assert_eq!(g1.days_active, 4);

    let g3 = &report.goals[2];
    assert_eq!(g3.action_count, 0);
    assert_eq!(g3.days_active, 0);
    assert_eq!(g3.last_activity_date, None);

    assert_eq!(report.trend.len(), 7);
    assert_eq!(report.trend[0].date, NaiveDate::from_ymd_opt(2023, 12, 30).unwrap());
    let counts: Vec<u32> = report.trend.iter().map(|p| p.actions_created).collect();
    assert_eq!(counts, vec![0, 0, 2, 1, 1, 1, 0]);

    assert_eq!(report.by_plant_type.len(), 3);
}

#[test]
fn exports() {
    let snap = snapshot();
    let report = GrowthAnalyzer::new().analyze(&snap.goals, &snap.actions, day(5));
    let at = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();

    let summary = export_report(ReportKind::Summary, ExportFormat::Csv, &report, at).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], SUMMARY_HEADER);
    assert_eq!(
        &lines[1..],
        &[
            "Total Goals,3",
            "Active Goals,1",
            "Completed Goals,1",
            "Withered Goals,1",
            "Total Actions,5",
            "Completed Actions,4",
            "Total XP,50",
            "Average Goal Level,1.3",
            "Completion Rate (%),80",
            "Current Streak (days),1",
            "Longest Streak (days),3",
        ]
    );

    let detailed = export_report(ReportKind::Detailed, ExportFormat::Csv, &report, at).unwrap();
    let lines: Vec<&str> = detailed.lines().collect();
    assert_eq!(lines[0], DETAILED_HEADER);
    assert_eq!(
        lines[2],
        "\"Learn Korean, slowly\",\"flower\",1,\"withered\",1,1,100,5,5,1,2024-01-05"
    );
    assert_eq!(lines[3], "\"Empty plot\",\"sprout\",0,\"completed\",0,0,0,0,0,0,");

    let analytics = export_report(ReportKind::Analytics, ExportFormat::Json, &report, at).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&analytics).unwrap();
    assert_eq!(doc["kind"], "analytics");
    assert_eq!(doc["trend"].as_array().unwrap().len(), 30);
    assert_eq!(doc["summary"]["completion_rate"], 80);
    assert_eq!(doc["generated_at"], "2024-01-05T12:00:00+00:00");
}
