//! Tree health derived from time since a goal was last watered.
//!
//! A goal is "watered" whenever one of its actions is completed. Health
//! decays in two steps:
//! - **Healthy**: watered less than 72 hours ago
//! - **Warning**: 72 to 168 hours (3 to 7 days)
//! - **Withered**: 168 hours or more
//!
//! Health is never stored; it is recomputed from `last_watered` on demand.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Goal;
use crate::time::parse_timestamp;

/// Hours without watering before a plant shows warning signs.
pub const WARNING_THRESHOLD_HOURS: f64 = 72.0;
/// Hours without watering before a plant withers.
pub const DEATH_THRESHOLD_HOURS: f64 = 168.0;
/// Assumed age of a watering when none is recorded or it cannot be read.
pub const FALLBACK_HOURS_SINCE: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Withered,
}

impl HealthStatus {
    pub fn from_hours_since(hours_since: f64) -> Self {
        if hours_since >= DEATH_THRESHOLD_HOURS {
            HealthStatus::Withered
        } else if hours_since >= WARNING_THRESHOLD_HOURS {
            HealthStatus::Warning
        } else {
            HealthStatus::Healthy
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy and growing",
            HealthStatus::Warning => "Thirsty - complete an action soon",
            HealthStatus::Withered => "Withered from neglect",
        }
    }
}

/// Derived freshness of a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeHealth {
    pub status: HealthStatus,
    /// Hours left before reaching `Warning`; 0 once there.
    pub hours_until_warning: f64,
    /// Hours left before reaching `Withered`; 0 once there.
    pub hours_until_death: f64,
    pub days_since_watered: u32,
}

impl TreeHealth {
    pub fn for_goal(goal: &Goal, now: DateTime<Utc>) -> Self {
        evaluate_tree_health(goal.last_watered.as_deref(), now)
    }

    pub fn needs_water(&self) -> bool {
        self.status != HealthStatus::Healthy
    }
}

/// Evaluate tree health from a raw last-watered timestamp.
///
/// Missing or unparsable timestamps are treated as a watering 24 hours
/// before `now`, which is always healthy. This function never fails.
pub fn evaluate_tree_health(last_watered: Option<&str>, now: DateTime<Utc>) -> TreeHealth {
    let watered_at = match last_watered {
        None => now - Duration::hours(FALLBACK_HOURS_SINCE),
        Some(raw) => parse_timestamp(raw).unwrap_or_else(|| {
            tracing::warn!(last_watered = raw, "unparsable last_watered, assuming recent watering");
            now - Duration::hours(FALLBACK_HOURS_SINCE)
        }),
    };

    from_hours_since(hours_between(watered_at, now))
}

/// Health for a known number of elapsed hours.
pub fn from_hours_since(hours_since: f64) -> TreeHealth {
    TreeHealth {
        status: HealthStatus::from_hours_since(hours_since),
        hours_until_warning: (WARNING_THRESHOLD_HOURS - hours_since).max(0.0),
        hours_until_death: (DEATH_THRESHOLD_HOURS - hours_since).max(0.0),
        days_since_watered: (hours_since / 24.0).floor().max(0.0) as u32,
    }
}

fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 3_600_000.0
}
