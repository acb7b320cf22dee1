//! # Growth Garden Core Library
//!
//! Goals are planted as plants, actions attached to them are completed for
//! XP, and completing an action "waters" its goal. This crate derives
//! everything the garden displays from snapshots fetched from the Growth
//! Garden API, and provides the client used to fetch them.
//!
//! ## Architecture
//!
//! - **Health**: plant freshness from hours since last watering
//! - **Growth**: plant type and level to growth-stage symbol
//! - **Analytics**: counts, XP, completion rate, streaks, per-goal reports
//!   and activity trends, all pure functions of their inputs
//! - **Export**: CSV and JSON renderings of analytics for download
//! - **API**: typed REST client with an explicitly invalidated cache
//! - **Storage**: TOML configuration and the persisted session token
//!
//! ## Key Components
//!
//! - [`evaluate_tree_health`]: health evaluator
//! - [`GrowthAnalyzer`]: full analytics report builder
//! - [`ApiClient`]: REST client
//! - [`Config`]: Application configuration management

pub mod analytics;
pub mod api;
pub mod error;
pub mod export;
pub mod growth;
pub mod health;
pub mod model;
pub mod session;
pub mod storage;
pub mod time;

pub use analytics::{AnalyticsReport, GoalReport, GrowthAnalytics, GrowthAnalyzer, Streak, TrendPoint};
pub use api::{ApiClient, ResourceCache};
pub use error::{ApiError, ConfigError, CoreError, ValidationError};
pub use export::{export_report, ExportFormat, ReportKind};
pub use growth::{growth_stage, stage_index};
pub use health::{evaluate_tree_health, HealthStatus, TreeHealth};
pub use model::{Action, ActionStatus, Goal, GoalStatus, Habit, PlantType, Snapshot};
pub use session::{Language, Session};
pub use storage::{Config, SessionStore};
pub use time::{Clock, FixedClock, SystemClock};
