//! Derived goal figures: completion percentage, status and collection counts.
//!
//! Everything here is a pure function of the goal data and a `now` instant. Results
//! are recomputed on every read and never persisted, since overdue detection depends
//! on the current date.

use super::goal::Goal;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle classification of a goal at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    /// Not yet complete and not past its due date
    InProgress,
    /// Progress reached the target
    Completed,
    /// Past its due date without reaching the target
    Overdue,
}

impl GoalStatus {
    /// Kebab-case label (`in-progress`, `completed`, `overdue`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Goal totals per status bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalCounts {
    /// Number of goals in the collection
    pub total: usize,
    /// Goals still in progress
    pub active: usize,
    /// Goals that reached their target
    pub completed: usize,
    /// Goals past their due date
    pub overdue: usize,
}

/// Calculates the completion percentage of `current` towards `target`.
///
/// Clamped to `[0, 100]`. `target` must be positive; the store rejects anything else
/// at creation.
#[must_use]
pub fn progress_percent(current: f64, target: f64) -> f64 {
    ((current / target) * 100.0).clamp(0.0, 100.0)
}

/// Classifies a goal as of `now`.
///
/// Completion wins over overdue: a goal finished after its deadline is completed.
/// The end date counts from its UTC midnight, so a goal is overdue for its whole due
/// day once that midnight has passed.
#[must_use]
pub fn goal_status(goal: &Goal, now: DateTime<Utc>) -> GoalStatus {
    if progress_percent(goal.current_value, goal.target_value) >= 100.0 {
        return GoalStatus::Completed;
    }

    match goal.end_date {
        Some(end_date) if end_date.and_time(NaiveTime::MIN).and_utc() < now => GoalStatus::Overdue,
        _ => GoalStatus::InProgress,
    }
}

/// Counts goals per status, evaluating every goal against the same `now`.
#[must_use]
pub fn aggregate_counts(goals: &[Goal], now: DateTime<Utc>) -> GoalCounts {
    goals.iter().fold(
        GoalCounts {
            total: goals.len(),
            ..GoalCounts::default()
        },
        |mut counts, goal| {
            match goal_status(goal, now) {
                GoalStatus::InProgress => counts.active += 1,
                GoalStatus::Completed => counts.completed += 1,
                GoalStatus::Overdue => counts.overdue += 1,
            }
            counts
        },
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::sample_goal;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_progress_percent_basic() {
        assert_eq!(progress_percent(0.0, 12.0), 0.0);
        assert_eq!(progress_percent(6.0, 12.0), 50.0);
        assert_eq!(progress_percent(12.0, 12.0), 100.0);
    }

    #[test]
    fn test_progress_percent_clamped() {
        assert_eq!(progress_percent(15.0, 12.0), 100.0);
        assert_eq!(progress_percent(-3.0, 12.0), 0.0);
    }

    #[test]
    fn test_progress_percent_monotonic() {
        let target = 7.5;
        let mut previous = 0.0;
        for step in 0..=40 {
            let current = f64::from(step) * 0.25;
            let percent = progress_percent(current, target);
            assert!(percent >= previous);
            assert!((0.0..=100.0).contains(&percent));
            previous = percent;
        }
    }

    #[test]
    fn test_status_in_progress() {
        let goal = sample_goal(1, 0.0, 12.0, None);
        assert_eq!(goal_status(&goal, fixed_now()), GoalStatus::InProgress);
    }

    #[test]
    fn test_status_completed() {
        let goal = sample_goal(1, 12.0, 12.0, None);
        assert_eq!(goal_status(&goal, fixed_now()), GoalStatus::Completed);
    }

    #[test]
    fn test_status_overdue_when_end_date_passed() {
        let yesterday = fixed_now().date_naive() - Duration::days(1);
        let goal = sample_goal(1, 3.0, 12.0, Some(yesterday));
        assert_eq!(goal_status(&goal, fixed_now()), GoalStatus::Overdue);
    }

    #[test]
    fn test_status_overdue_on_due_day_after_midnight() {
        let today = fixed_now().date_naive();
        let goal = sample_goal(1, 3.0, 12.0, Some(today));
        assert_eq!(goal_status(&goal, fixed_now()), GoalStatus::Overdue);
    }

    #[test]
    fn test_status_not_overdue_at_due_day_midnight() {
        let today = fixed_now().date_naive();
        let midnight = today.and_time(NaiveTime::MIN).and_utc();
        let goal = sample_goal(1, 3.0, 12.0, Some(today));
        assert_eq!(goal_status(&goal, midnight), GoalStatus::InProgress);
    }

    #[test]
    fn test_status_not_overdue_before_due_day() {
        let tomorrow = fixed_now().date_naive() + Duration::days(1);
        let goal = sample_goal(1, 3.0, 12.0, Some(tomorrow));
        assert_eq!(goal_status(&goal, fixed_now()), GoalStatus::InProgress);
    }

    #[test]
    fn test_completion_takes_precedence_over_overdue() {
        let long_ago = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let goal = sample_goal(1, 12.0, 12.0, Some(long_ago));
        assert_eq!(goal_status(&goal, fixed_now()), GoalStatus::Completed);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(GoalStatus::InProgress.to_string(), "in-progress");
        assert_eq!(GoalStatus::Completed.to_string(), "completed");
        assert_eq!(GoalStatus::Overdue.to_string(), "overdue");
        assert_eq!(
            serde_json::to_string(&GoalStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
    }

    #[test]
    fn test_aggregate_counts() {
        let yesterday = fixed_now().date_naive() - Duration::days(1);
        let goals = vec![
            sample_goal(1, 0.0, 10.0, None),
            sample_goal(2, 10.0, 10.0, None),
            sample_goal(3, 10.0, 10.0, Some(yesterday)),
            sample_goal(4, 2.0, 10.0, Some(yesterday)),
            sample_goal(5, 9.0, 10.0, None),
        ];

        let counts = aggregate_counts(&goals, fixed_now());
        assert_eq!(
            counts,
            GoalCounts {
                total: 5,
                active: 2,
                completed: 2,
                overdue: 1,
            }
        );
    }

    #[test]
    fn test_aggregate_counts_empty() {
        assert_eq!(aggregate_counts(&[], fixed_now()), GoalCounts::default());
    }
}
