//! Actions: discrete tasks attached to a goal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    #[default]
    Pending,
    Completed,
}

/// Optional self-reflection recorded when an action is completed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeling: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// 1 (easy) to 5 (hard)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    /// 1 (unsatisfied) to 5 (very satisfied)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<u8>,
}

impl Reflection {
    pub const MIN_SCORE: u8 = 1;
    pub const MAX_SCORE: u8 = 5;

    pub fn is_empty(&self) -> bool {
        self.feeling.is_none()
            && self.note.is_none()
            && self.difficulty.is_none()
            && self.satisfaction.is_none()
    }

    /// Check that scores are within 1-5.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("difficulty", self.difficulty), ("satisfaction", self.satisfaction)] {
            if let Some(v) = value {
                if !(Self::MIN_SCORE..=Self::MAX_SCORE).contains(&v) {
                    return Err(ValidationError::OutOfRange {
                        field: field.to_string(),
                        value: v,
                        min: Self::MIN_SCORE,
                        max: Self::MAX_SCORE,
                    });
                }
            }
        }
        Ok(())
    }
}

/// An action as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub goal_id: String,
    pub title: String,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default = "default_xp_reward")]
    pub xp_reward: u32,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub reflection: Reflection,
}

fn default_xp_reward() -> u32 {
    10
}

impl Action {
    pub fn is_completed(&self) -> bool {
        self.status == ActionStatus::Completed
    }

    /// UTC calendar date of completion, if completed with a readable timestamp.
    pub fn completed_date(&self) -> Option<NaiveDate> {
        if !self.is_completed() {
            return None;
        }
        self.completed_at.as_deref().and_then(parse_date)
    }

    pub fn created_date(&self) -> Option<NaiveDate> {
        self.created_at.as_deref().and_then(parse_date)
    }

    /// Date the action last saw activity: completion if completed, else creation.
    pub fn activity_date(&self) -> Option<NaiveDate> {
        self.completed_date().or_else(|| self.created_date())
    }
}

/// Payload for `POST /actions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAction {
    pub goal_id: String,
    pub title: String,
    pub xp_reward: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl NewAction {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "title".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.xp_reward == 0 {
            return Err(ValidationError::InvalidValue {
                field: "xp_reward".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(json: &str) -> Action {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn reflection_fields_are_flattened() {
        let a = action(
            r#"{"id":"a1","goal_id":"g1","title":"Run","status":"completed",
                "xp_reward":20,"completed_at":"2024-01-02T08:00:00Z",
                "feeling":"proud","difficulty":3,"satisfaction":5}"#,
        );
        assert_eq!(a.reflection.feeling.as_deref(), Some("proud"));
        assert_eq!(a.reflection.difficulty, Some(3));
        assert!(a.reflection.validate().is_ok());
    }

    #[test]
    fn completed_date_requires_completed_status() {
        let pending = action(
            r#"{"id":"a1","goal_id":"g1","title":"Run","completed_at":"2024-01-02T08:00:00Z",
                "created_at":"2024-01-01T08:00:00Z"}"#,
        );
        assert_eq!(pending.completed_date(), None);
        assert_eq!(pending.activity_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn reflection_rejects_out_of_range_scores() {
        let r = Reflection {
            difficulty: Some(6),
            ..Default::default()
        };
        assert!(matches!(
            r.validate(),
            Err(ValidationError::OutOfRange { value: 6, .. })
        ));
        let r = Reflection {
            satisfaction: Some(0),
            ..Default::default()
        };
        assert!(r.validate().is_err());
        assert!(Reflection::default().is_empty());
    }

    #[test]
    fn new_action_requires_positive_xp() {
        let mut new = NewAction {
            goal_id: "g1".into(),
            title: "Stretch".into(),
            xp_reward: 0,
            due_date: None,
        };
        assert!(new.validate().is_err());
        new.xp_reward = 5;
        assert!(new.validate().is_ok());
    }
}
