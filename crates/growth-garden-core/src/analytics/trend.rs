//! Daily activity trend over a trailing window.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Action;

pub const DEFAULT_TREND_DAYS: u32 = 30;
/// Widest window accepted; longer requests are clamped to ten years.
pub const MAX_TREND_DAYS: u32 = 3650;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub actions_created: u32,
}

/// Count actions created per day over the `days` days ending at `today`.
///
/// Every day in the window appears, zero-filled. Actions created outside the
/// window or without a readable `created_at` are ignored. A zero-length
/// window yields no points, and windows wider than [`MAX_TREND_DAYS`] are
/// clamped.
pub fn activity_trend(actions: &[Action], today: NaiveDate, days: u32) -> Vec<TrendPoint> {
    if days == 0 {
        return Vec::new();
    }

    let days = days.min(MAX_TREND_DAYS);
    let start = today
        .checked_sub_days(Days::new(u64::from(days - 1)))
        .unwrap_or(NaiveDate::MIN);
    let mut buckets: BTreeMap<NaiveDate, u32> = start
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| (date, 0))
        .collect();

    for date in actions.iter().filter_map(Action::created_date) {
        if let Some(count) = buckets.get_mut(&date) {
            *count += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(date, actions_created)| TrendPoint { date, actions_created })
        .collect()
}
