//! Goal records and the drafts they are created from.
//!
//! A [`Goal`] is the only persisted entity. Its serialized field names are the
//! camelCase names stored in the slot, so changing them breaks existing data.

use crate::errors::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

/// Date format used for start and end dates entered by the user.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed set of goal categories. Each one maps to a display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Personal goals
    #[default]
    Personal,
    /// Health goals
    Health,
    /// Career goals
    Career,
    /// Finance goals
    Finance,
    /// Education goals
    Education,
    /// Fitness goals
    Fitness,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::Personal,
        Self::Health,
        Self::Career,
        Self::Finance,
        Self::Education,
        Self::Fitness,
    ];

    /// Lowercase name as stored and displayed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Health => "health",
            Self::Career => "career",
            Self::Finance => "finance",
            Self::Education => "education",
            Self::Fitness => "fitness",
        }
    }

    /// Hex color token assigned to goals of this category.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Personal => "#3B82F6",
            Self::Health => "#10B981",
            Self::Career => "#8B5CF6",
            Self::Finance => "#F59E0B",
            Self::Education => "#6366F1",
            Self::Fitness => "#EF4444",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// A tracked objective with a numeric target and current progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique, immutable identifier (creation time in epoch milliseconds)
    pub id: i64,
    /// Non-empty title
    pub title: String,
    /// Optional free-form description
    #[serde(default, deserialize_with = "empty_text_as_none")]
    pub description: Option<String>,
    /// Category chosen at creation
    pub category: Category,
    /// Positive target, fixed at creation
    pub target_value: f64,
    /// Progress so far, never above `target_value`
    pub current_value: f64,
    /// Optional unit label (e.g., "books", "km")
    #[serde(default, deserialize_with = "empty_text_as_none")]
    pub unit: Option<String>,
    /// First day of the goal
    pub start_date: NaiveDate,
    /// Optional due date used for overdue detection
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub end_date: Option<NaiveDate>,
    /// Color token derived from the category at creation
    pub color: String,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Milestone entries, carried through unchanged (always empty for new goals)
    #[serde(default)]
    pub milestones: Vec<serde_json::Value>,
}

impl Goal {
    /// Completion percentage in `[0, 100]`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        super::derive::progress_percent(self.current_value, self.target_value)
    }

    /// Lifecycle status as of `now`.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>) -> super::derive::GoalStatus {
        super::derive::goal_status(self, now)
    }
}

/// User-entered values for a new goal, as collected by a creation form.
///
/// Numeric and date fields stay as text so that parsing and rejection happen in one
/// place. Empty optional text counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    /// Required title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Category, personal unless chosen otherwise
    #[serde(default)]
    pub category: Category,
    /// Required target, must parse to a number greater than zero
    pub target_value: String,
    /// Optional starting value, zero when absent
    pub current_value: Option<String>,
    /// Optional unit label
    pub unit: Option<String>,
    /// Optional start date (`YYYY-MM-DD`), the creation date when absent
    pub start_date: Option<String>,
    /// Optional end date (`YYYY-MM-DD`)
    pub end_date: Option<String>,
}

impl GoalDraft {
    /// Starts a draft with the two required fields.
    pub fn new(title: impl Into<String>, target_value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            target_value: target_value.into(),
            ..Self::default()
        }
    }

    /// Sets the category.
    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the starting value text.
    #[must_use]
    pub fn current_value(mut self, current_value: impl Into<String>) -> Self {
        self.current_value = Some(current_value.into());
        self
    }

    /// Sets the unit label.
    #[must_use]
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the start date text.
    #[must_use]
    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the end date text.
    #[must_use]
    pub fn end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    /// Validates the draft and builds the goal it describes.
    ///
    /// # Errors
    /// Returns the first rejection found: [`Error::MissingTitle`],
    /// [`Error::InvalidTargetValue`], [`Error::InvalidCurrentValue`] or
    /// [`Error::InvalidDate`]. Nothing is built on rejection.
    pub fn into_goal(self, id: i64, now: DateTime<Utc>) -> Result<Goal> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::MissingTitle);
        }

        let target_value = parse_number(&self.target_value)
            .filter(|v| *v > 0.0)
            .ok_or_else(|| Error::InvalidTargetValue {
                input: self.target_value.clone(),
            })?;

        let current_value = match non_empty(self.current_value.as_deref()) {
            None => 0.0,
            Some(text) => parse_number(text)
                .filter(|v| *v >= 0.0)
                .ok_or_else(|| Error::InvalidCurrentValue {
                    input: text.to_string(),
                })?,
        };

        let start_date = match non_empty(self.start_date.as_deref()) {
            Some(text) => parse_date(text)?,
            None => now.date_naive(),
        };
        let end_date = non_empty(self.end_date.as_deref())
            .map(parse_date)
            .transpose()?;

        Ok(Goal {
            id,
            title: title.to_string(),
            description: non_empty(self.description.as_deref()).map(str::to_string),
            category: self.category,
            target_value,
            current_value: current_value.min(target_value),
            unit: non_empty(self.unit.as_deref()).map(str::to_string),
            start_date,
            end_date,
            color: self.category.color().to_string(),
            created_at: now,
            milestones: Vec::new(),
        })
    }
}

/// Parses user-entered text as a finite number.
#[must_use]
pub fn parse_number(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        input: input.to_string(),
    })
}

/// Stored text fields may hold `""` for "not set".
fn empty_text_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// Stored dates may hold `""` for "not set".
fn empty_date_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match non_empty(value.as_deref()) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
