//! Analytics over goal and action snapshots.
//!
//! Everything here is a pure function of its inputs plus an injected
//! "today". Rates and averages guard against empty inputs and yield 0.

pub mod goal_report;
pub mod streak;
pub mod summary;
pub mod trend;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use goal_report::{goal_report, goal_reports, GoalReport};
pub use streak::{calculate_streak, Streak};
pub use summary::{
    action_streak, calculate_growth_analytics, completion_rate, plant_type_breakdown,
    GrowthAnalytics, PlantTypeBreakdown,
};
pub use trend::{activity_trend, TrendPoint, DEFAULT_TREND_DAYS, MAX_TREND_DAYS};

use crate::model::{Action, Goal};

/// Everything the export layer can render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub analytics: GrowthAnalytics,
    pub goals: Vec<GoalReport>,
    pub trend: Vec<TrendPoint>,
    pub by_plant_type: Vec<PlantTypeBreakdown>,
}

/// Builds full analytics reports with a configurable trend window.
#[derive(Debug, Clone)]
pub struct GrowthAnalyzer {
    pub trend_days: u32,
}

impl Default for GrowthAnalyzer {
    fn default() -> Self {
        Self {
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

impl GrowthAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trend_days(trend_days: u32) -> Self {
        Self { trend_days }
    }

    pub fn analyze(&self, goals: &[Goal], actions: &[Action], today: NaiveDate) -> AnalyticsReport {
        tracing::debug!(
            goals = goals.len(),
            actions = actions.len(),
            trend_days = self.trend_days,
            "building analytics report"
        );

        AnalyticsReport {
            analytics: calculate_growth_analytics(goals, actions, today),
            goals: goal_reports(goals, actions),
            trend: activity_trend(actions, today, self.trend_days),
            by_plant_type: plant_type_breakdown(goals),
        }
    }
}
