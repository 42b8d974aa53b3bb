//! Text summaries of goals for list and detail views.
//!
//! All functions are framework-agnostic and return plain strings; derived values
//! are computed on each call from the goal and `now`.

use super::{
    derive::{GoalCounts, goal_status},
    goal::Goal,
};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: usize) -> String {
    let clamped_progress = progress_percent.clamp(0.0, 100.0);

    // Cast safety: clamped_progress ∈ [0, 100], bar_length is small.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped_progress / 100.0) * bar_length as f64).round() as usize;
    let empty = bar_length.saturating_sub(filled);

    let filled_str = "█".repeat(filled);
    let empty_str = "░".repeat(empty);

    format!("[{filled_str}{empty_str}] {clamped_progress:.0}%")
}

/// Formats progress as `current / target unit`, e.g. `4 / 12 books`.
#[must_use]
pub fn format_progress_line(goal: &Goal) -> String {
    match goal.unit.as_deref() {
        Some(unit) => format!("{} / {} {unit}", goal.current_value, goal.target_value),
        None => format!("{} / {}", goal.current_value, goal.target_value),
    }
}

/// One-line summary of a goal for list views.
///
/// Example: `Read 12 books [personal] 4 / 12 books [███░░░░░░░] 33% in-progress, due 2024-12-31`
#[must_use]
pub fn format_goal_line(goal: &Goal, now: DateTime<Utc>, bar_length: usize) -> String {
    let bar = format_progress_bar(goal.progress_percent(), bar_length);
    let status = goal_status(goal, now);
    let mut line = format!(
        "{} [{}] {} {bar} {status}",
        goal.title,
        goal.category,
        format_progress_line(goal)
    );
    if let Some(end_date) = goal.end_date {
        let _ = write!(line, ", due {end_date}");
    }
    line
}

/// Summarizes collection totals, e.g. `5 goals: 2 active, 2 completed, 1 overdue`.
#[must_use]
pub fn format_counts(counts: &GoalCounts) -> String {
    format!(
        "{} goals: {} active, {} completed, {} overdue",
        counts.total, counts.active, counts.completed, counts.overdue
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::sample_goal;
    use chrono::{NaiveDate, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_format_progress_bar_full() {
        assert_eq!(format_progress_bar(100.0, 10), "[██████████] 100%");
    }

    #[test]
    fn test_format_progress_bar_empty() {
        assert_eq!(format_progress_bar(0.0, 10), "[░░░░░░░░░░] 0%");
    }

    #[test]
    fn test_format_progress_bar_half() {
        assert_eq!(format_progress_bar(50.0, 10), "[█████░░░░░] 50%");
    }

    #[test]
    fn test_format_progress_bar_custom_length() {
        assert_eq!(format_progress_bar(75.0, 4), "[███░] 75%");
    }

    #[test]
    fn test_format_progress_bar_clamps_out_of_range() {
        assert_eq!(format_progress_bar(150.0, 5), "[█████] 100%");
        assert_eq!(format_progress_bar(-10.0, 5), "[░░░░░] 0%");
    }

    #[test]
    fn test_format_progress_line_with_and_without_unit() {
        let mut goal = sample_goal(1, 4.0, 12.0, None);
        assert_eq!(format_progress_line(&goal), "4 / 12");

        goal.unit = Some("books".to_string());
        assert_eq!(format_progress_line(&goal), "4 / 12 books");

        goal.current_value = 2.5;
        assert_eq!(format_progress_line(&goal), "2.5 / 12 books");
    }

    #[test]
    fn test_format_goal_line() {
        let mut goal = sample_goal(1, 6.0, 12.0, NaiveDate::from_ymd_opt(2024, 12, 31));
        goal.title = "Read 12 books".to_string();
        goal.unit = Some("books".to_string());

        assert_eq!(
            format_goal_line(&goal, fixed_now(), 4),
            "Read 12 books [personal] 6 / 12 books [██░░] 50% in-progress, due 2024-12-31"
        );
    }

    #[test]
    fn test_format_goal_line_overdue_without_unit() {
        let goal = sample_goal(1, 1.0, 4.0, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(
            format_goal_line(&goal, fixed_now(), 4),
            "Goal 1 [personal] 1 / 4 [█░░░] 25% overdue, due 2024-03-01"
        );
    }

    #[test]
    fn test_format_counts() {
        let counts = GoalCounts {
            total: 5,
            active: 2,
            completed: 2,
            overdue: 1,
        };
        assert_eq!(
            format_counts(&counts),
            "5 goals: 2 active, 2 completed, 1 overdue"
        );
    }
}
