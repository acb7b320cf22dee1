//! Goals: long-term objectives rendered as growing plants.

use serde::{Deserialize, Serialize};

/// Kind of plant a goal grows into.
///
/// Deserialization is lenient: any unrecognised string becomes `Sprout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PlantType {
    #[default]
    Sprout,
    Herb,
    Tree,
    Flower,
}

impl PlantType {
    pub const ALL: [PlantType; 4] = [
        PlantType::Sprout,
        PlantType::Herb,
        PlantType::Tree,
        PlantType::Flower,
    ];

    /// Parse a plant type, falling back to `Sprout` for unknown input.
    pub fn from_str_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "herb" => PlantType::Herb,
            "tree" => PlantType::Tree,
            "flower" => PlantType::Flower,
            _ => PlantType::Sprout,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantType::Sprout => "sprout",
            PlantType::Herb => "herb",
            PlantType::Tree => "tree",
            PlantType::Flower => "flower",
        }
    }
}

impl From<String> for PlantType {
    fn from(raw: String) -> Self {
        PlantType::from_str_lossy(&raw)
    }
}

impl std::fmt::Display for PlantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Withered,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Withered => "withered",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "active" => Ok(GoalStatus::Active),
            "completed" => Ok(GoalStatus::Completed),
            "withered" => Ok(GoalStatus::Withered),
            other => Err(format!(
                "unknown goal status '{other}' (expected active, completed or withered)"
            )),
        }
    }
}

/// A goal as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub plant_type: PlantType,
    #[serde(default)]
    pub current_level: u32,
    #[serde(default)]
    pub current_xp: u32,
    #[serde(default = "default_max_xp")]
    pub max_xp: u32,
    #[serde(default)]
    pub status: GoalStatus,
    /// Raw timestamp of the last completed action. Kept unparsed so that
    /// malformed values reach the health evaluator's fallback.
    #[serde(default)]
    pub last_watered: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_max_xp() -> u32 {
    100
}

impl Goal {
    /// XP progress towards the next level, 0.0 to 1.0.
    pub fn level_progress(&self) -> f64 {
        if self.max_xp == 0 {
            return 0.0;
        }
        (self.current_xp as f64 / self.max_xp as f64).clamp(0.0, 1.0)
    }

    pub fn is_withered(&self) -> bool {
        self.status == GoalStatus::Withered
    }
}

/// Payload for `POST /goals`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGoal {
    pub name: String,
    pub plant_type: PlantType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `PATCH /goals/{id}`; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_type: Option<PlantType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
}
