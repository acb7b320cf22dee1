//! Daily habits and their check-in logs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::streak::{calculate_streak, Streak};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitLog {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub goal_id: Option<String>,
    #[serde(default)]
    pub logs: Vec<HabitLog>,
}

impl Habit {
    /// Streak of consecutive logged days, anchored on `today`.
    pub fn streak(&self, today: NaiveDate) -> Streak {
        calculate_streak(self.logs.iter().map(|log| log.date), today)
    }

    pub fn is_logged_on(&self, date: NaiveDate) -> bool {
        self.logs.iter().any(|log| log.date == date)
    }
}
