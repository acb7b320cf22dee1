//! Per-goal detailed report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::summary::{average, completion_rate};
use crate::model::{Action, Goal, GoalStatus, PlantType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalReport {
    pub goal_id: String,
    pub goal_name: String,
    pub plant_type: PlantType,
    pub level: u32,
    pub status: GoalStatus,
    pub action_count: u32,
    pub completed_action_count: u32,
    /// XP from completed actions
    pub total_xp: u64,
    /// Mean XP per completed action, one decimal
    pub average_xp: f64,
    pub completion_rate: u32,
    pub first_activity_date: Option<NaiveDate>,
    pub last_activity_date: Option<NaiveDate>,
    /// Inclusive day span between first and last activity; 0 without actions
    pub days_active: u32,
}

/// Build the report for one goal. `actions` may contain other goals'
/// actions; only those whose `goal_id` matches are considered.
pub fn goal_report(goal: &Goal, actions: &[Action]) -> GoalReport {
    let owned: Vec<&Action> = actions.iter().filter(|a| a.goal_id == goal.id).collect();

    let action_count = owned.len() as u32;
    let completed: Vec<&&Action> = owned.iter().filter(|a| a.is_completed()).collect();
    let completed_action_count = completed.len() as u32;
    let total_xp: u64 = completed.iter().map(|a| a.xp_reward as u64).sum();

    let dates: Vec<NaiveDate> = owned.iter().filter_map(|a| a.activity_date()).collect();
    let first_activity_date = dates.iter().min().copied();
    let last_activity_date = dates.iter().max().copied();
    let days_active = match (first_activity_date, last_activity_date) {
        (Some(first), Some(last)) => (last - first).num_days() as u32 + 1,
        _ => 0,
    };

    GoalReport {
        goal_id: goal.id.clone(),
        goal_name: goal.name.clone(),
        plant_type: goal.plant_type,
        level: goal.current_level,
        status: goal.status,
        action_count,
        completed_action_count,
        total_xp,
        average_xp: average(total_xp as f64, completed.len()),
        completion_rate: completion_rate(completed_action_count, action_count),
        first_activity_date,
        last_activity_date,
        days_active,
    }
}

/// Reports for every goal, in input order.
pub fn goal_reports(goals: &[Goal], actions: &[Action]) -> Vec<GoalReport> {
    goals.iter().map(|g| goal_report(g, actions)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActionStatus;

    fn goal(id: &str) -> Goal {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "Learn Rust",
            "plant_type": "tree",
            "current_level": 3,
        }))
        .unwrap()
    }

    fn action(goal_id: &str, xp: u32, created: &str, completed: Option<&str>) -> Action {
        Action {
            id: format!("{goal_id}-{created}"),
            goal_id: goal_id.into(),
            title: "Chapter".into(),
            status: if completed.is_some() {
                ActionStatus::Completed
            } else {
                ActionStatus::Pending
            },
            xp_reward: xp,
            due_date: None,
            completed_at: completed.map(str::to_string),
            created_at: Some(created.to_string()),
            reflection: Default::default(),
        }
    }

    #[test]
    fn goal_without_actions_is_all_zero() {
        let report = goal_report(&goal("g1"), &[action("other", 10, "2024-01-01", None)]);
        assert_eq!(report.action_count, 0);
        assert_eq!(report.completed_action_count, 0);
        assert_eq!(report.completion_rate, 0);
        assert_eq!(report.average_xp, 0.0);
        assert_eq!(report.days_active, 0);
        assert_eq!(report.last_activity_date, None);
    }

    #[test]
    fn scoped_counts_and_span() {
        let actions = vec![
            action("g1", 10, "2024-01-01T08:00:00Z", Some("2024-01-02T08:00:00Z")),
            action("g1", 25, "2024-01-03T08:00:00Z", Some("2024-01-06T20:00:00Z")),
            action("g1", 40, "2024-01-04T08:00:00Z", None),
            action("g2", 100, "2023-12-01T08:00:00Z", Some("2023-12-01T09:00:00Z")),
        ];
        let report = goal_report(&goal("g1"), &actions);
        assert_eq!(report.action_count, 3);
        assert_eq!(report.completed_action_count, 2);
        assert_eq!(report.total_xp, 35);
        assert_eq!(report.average_xp, 17.5);
        assert_eq!(report.completion_rate, 67);
        assert_eq!(report.first_activity_date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(report.last_activity_date, NaiveDate::from_ymd_opt(2024, 1, 6));
        assert_eq!(report.days_active, 5);
    }

    #[test]
    fn single_day_activity_counts_one_day() {
        let actions = vec![action("g1", 5, "2024-01-01T08:00:00Z", None)];
        assert_eq!(goal_report(&goal("g1"), &actions).days_active, 1);
    }
}
