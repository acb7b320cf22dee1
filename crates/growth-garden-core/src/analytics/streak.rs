//! Activity streaks over calendar days.
//!
//! A streak is a run of consecutive calendar days with at least one
//! activity. The current streak stays alive through the whole of the day
//! after the last activity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Length in days of the run ending today or yesterday, else 0
    pub current: u32,
    /// Longest run ever observed
    pub longest: u32,
}

/// Compute current and longest streaks from activity dates.
///
/// Dates may be unsorted and repeated; only distinct days count.
pub fn calculate_streak<I>(dates: I, today: NaiveDate) -> Streak
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: Vec<NaiveDate> = dates.into_iter().collect::<BTreeSet<_>>().into_iter().collect();

    let Some(&latest) = days.last() else {
        return Streak::default();
    };

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in days.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
    }

    let current = if is_streak_anchor(latest, today) {
        let mut count = 1u32;
        for pair in days.windows(2).rev() {
            if (pair[1] - pair[0]).num_days() != 1 {
                break;
            }
            count += 1;
        }
        count
    } else {
        0
    };

    Streak { current, longest }
}

/// Whether `latest` still keeps a streak alive on `today`.
fn is_streak_anchor(latest: NaiveDate, today: NaiveDate) -> bool {
    latest == today || today.pred_opt() == Some(latest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn sample() -> Vec<NaiveDate> {
        vec![d(1, 1), d(1, 2), d(1, 3), d(1, 5)]
    }

    #[test]
    fn empty_dates_yield_zero() {
        assert_eq!(calculate_streak(Vec::new(), d(1, 1)), Streak::default());
    }

    #[test]
    fn stale_latest_date_breaks_current_streak() {
        let streak = calculate_streak(sample(), d(1, 10));
        assert_eq!(streak, Streak { current: 0, longest: 3 });
    }

    #[test]
    fn latest_today_with_gap_behind_is_one() {
        let streak = calculate_streak(sample(), d(1, 5));
        assert_eq!(streak, Streak { current: 1, longest: 3 });
    }

    #[test]
    fn latest_yesterday_keeps_streak_alive() {
        let streak = calculate_streak(sample(), d(1, 6));
        assert_eq!(streak.current, 1);

        let streak = calculate_streak(vec![d(1, 1), d(1, 2), d(1, 3)], d(1, 4));
        assert_eq!(streak, Streak { current: 3, longest: 3 });
    }

    #[test]
    fn duplicates_and_order_do_not_matter() {
        let dates = vec![d(1, 3), d(1, 1), d(1, 2), d(1, 2), d(1, 3)];
        assert_eq!(calculate_streak(dates, d(1, 3)), Streak { current: 3, longest: 3 });
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let dates = vec![d(1, 30), d(1, 31), d(2, 1)];
        assert_eq!(calculate_streak(dates, d(2, 1)).current, 3);
    }

    #[test]
    fn longest_counts_final_open_run() {
        let dates = vec![d(1, 1), d(1, 3), d(1, 4), d(1, 5), d(1, 6)];
        assert_eq!(calculate_streak(dates, d(3, 1)), Streak { current: 0, longest: 4 });
    }
}
