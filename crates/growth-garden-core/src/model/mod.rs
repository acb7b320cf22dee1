//! Entities exchanged with the Growth Garden API.

mod action;
mod goal;
mod habit;
mod report;

use serde::{Deserialize, Serialize};

pub use action::{Action, ActionStatus, NewAction, Reflection};
pub use goal::{Goal, GoalStatus, GoalUpdate, NewGoal, PlantType};
pub use habit::{Habit, HabitLog};
pub use report::{AuthResponse, User, WeeklyReport};

/// A point-in-time copy of a user's garden, either fetched from the API or
/// read from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub habits: Vec<Habit>,
}

impl Snapshot {
    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn actions_for<'a>(&'a self, goal_id: &'a str) -> impl Iterator<Item = &'a Action> + 'a {
        self.actions.iter().filter(move |a| a.goal_id == goal_id)
    }
}
