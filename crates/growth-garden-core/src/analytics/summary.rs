//! Garden-wide growth analytics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::streak::{calculate_streak, Streak};
use crate::model::{Action, Goal, GoalStatus, PlantType};

/// Aggregate snapshot of a user's garden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthAnalytics {
    pub total_goals: u32,
    pub active_goals: u32,
    pub completed_goals: u32,
    pub withered_goals: u32,
    pub total_actions: u32,
    pub completed_actions: u32,
    /// XP summed over completed actions only
    pub total_xp: u64,
    /// Mean goal level rounded to one decimal
    pub average_goal_level: f64,
    /// Percentage of actions completed, 0-100
    pub completion_rate: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
}

/// Goal counts and levels for one plant type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantTypeBreakdown {
    pub plant_type: PlantType,
    pub goals: u32,
    pub average_level: f64,
}

/// Compute garden-wide analytics. `today` anchors the current streak.
pub fn calculate_growth_analytics(goals: &[Goal], actions: &[Action], today: NaiveDate) -> GrowthAnalytics {
    let mut analytics = GrowthAnalytics {
        total_goals: goals.len() as u32,
        total_actions: actions.len() as u32,
        ..Default::default()
    };

    for goal in goals {
        match goal.status {
            GoalStatus::Active => analytics.active_goals += 1,
            GoalStatus::Completed => analytics.completed_goals += 1,
            GoalStatus::Withered => analytics.withered_goals += 1,
        }
    }

    for action in actions.iter().filter(|a| a.is_completed()) {
        analytics.completed_actions += 1;
        analytics.total_xp += action.xp_reward as u64;
    }

    let level_sum: u64 = goals.iter().map(|g| g.current_level as u64).sum();
    analytics.average_goal_level = average(level_sum as f64, goals.len());
    analytics.completion_rate = completion_rate(analytics.completed_actions, analytics.total_actions);

    let Streak { current, longest } = action_streak(actions, today);
    analytics.current_streak = current;
    analytics.longest_streak = longest;

    analytics
}

/// Streak over the days on which any action was completed.
pub fn action_streak(actions: &[Action], today: NaiveDate) -> Streak {
    calculate_streak(actions.iter().filter_map(Action::completed_date), today)
}

/// Goal count and average level per plant type, in plant-type order.
pub fn plant_type_breakdown(goals: &[Goal]) -> Vec<PlantTypeBreakdown> {
    let mut by_type: BTreeMap<PlantType, (u32, u64)> = BTreeMap::new();
    for goal in goals {
        let entry = by_type.entry(goal.plant_type).or_default();
        entry.0 += 1;
        entry.1 += goal.current_level as u64;
    }

    by_type
        .into_iter()
        .map(|(plant_type, (count, levels))| PlantTypeBreakdown {
            plant_type,
            goals: count,
            average_level: average(levels as f64, count as usize),
        })
        .collect()
}

/// `round(completed / total * 100)`, or 0 when there is nothing to complete.
pub fn completion_rate(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (completed as f64 / total as f64 * 100.0).round() as u32
}

/// Mean rounded to one decimal, or 0 for an empty set.
pub(crate) fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    round1(sum / count as f64)
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActionStatus;

    fn goal(id: &str, plant: PlantType, level: u32, status: GoalStatus) -> Goal {
        Goal {
            id: id.into(),
            name: format!("Goal {id}"),
            description: None,
            plant_type: plant,
            current_level: level,
            current_xp: 0,
            max_xp: 100,
            status,
            last_watered: None,
            created_at: None,
        }
    }

    fn action(goal_id: &str, xp: u32, completed_at: Option<&str>) -> Action {
        Action {
            id: format!("{goal_id}-{xp}"),
            goal_id: goal_id.into(),
            title: "Do it".into(),
            status: if completed_at.is_some() {
                ActionStatus::Completed
            } else {
                ActionStatus::Pending
            },
            xp_reward: xp,
            due_date: None,
            completed_at: completed_at.map(str::to_string),
            created_at: None,
            reflection: Default::default(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn empty_inputs_produce_zeroes() {
        let analytics = calculate_growth_analytics(&[], &[], today());
        assert_eq!(analytics, GrowthAnalytics::default());
        assert_eq!(completion_rate(0, 0), 0);
    }

    #[test]
    fn counts_statuses_and_sums_completed_xp() {
        let goals = vec![
            goal("a", PlantType::Tree, 1, GoalStatus::Active),
            goal("b", PlantType::Herb, 2, GoalStatus::Completed),
            goal("c", PlantType::Tree, 2, GoalStatus::Withered),
        ];
        let actions = vec![
            action("a", 10, Some("2024-01-04T10:00:00Z")),
            action("a", 15, Some("2024-01-05T09:00:00Z")),
            action("b", 99, None),
        ];

        let analytics = calculate_growth_analytics(&goals, &actions, today());
        assert_eq!(analytics.total_goals, 3);
        assert_eq!(analytics.active_goals, 1);
        assert_eq!(analytics.completed_goals, 1);
        assert_eq!(analytics.withered_goals, 1);
        assert_eq!(analytics.total_actions, 3);
        assert_eq!(analytics.completed_actions, 2);
        assert_eq!(analytics.total_xp, 25);
        assert_eq!(analytics.average_goal_level, 1.7);
        assert_eq!(analytics.completion_rate, 67);
        assert_eq!(analytics.current_streak, 2);
        assert_eq!(analytics.longest_streak, 2);
    }

    #[test]
    fn completed_without_timestamp_counts_xp_but_not_streak() {
        let mut a = action("a", 10, None);
        a.status = ActionStatus::Completed;
        let analytics = calculate_growth_analytics(&[], &[a], today());
        assert_eq!(analytics.total_xp, 10);
        assert_eq!(analytics.longest_streak, 0);
    }

    #[test]
    fn breakdown_groups_by_plant_type() {
        let goals = vec![
            goal("a", PlantType::Tree, 1, GoalStatus::Active),
            goal("b", PlantType::Tree, 4, GoalStatus::Active),
            goal("c", PlantType::Sprout, 2, GoalStatus::Active),
        ];
        let breakdown = plant_type_breakdown(&goals);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].plant_type, PlantType::Sprout);
        assert_eq!(breakdown[1].goals, 2);
        assert_eq!(breakdown[1].average_level, 2.5);
    }
}
