//! API request and response types

use crate::models::{
    BodyPart, GoalFrequency, MovementPattern, TargetType, Theme, WeightUnit,
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Inclusive date range for set queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The whole calendar month containing `day`
    pub fn month_of(day: NaiveDate) -> Self {
        let start = day.with_day(1).expect("day 1 always exists");
        let end = if start.month() == 12 {
            start
                .with_year(start.year() + 1)
                .and_then(|d| d.with_month(1))
        } else {
            start.with_month(start.month() + 1)
        }
        .expect("first of next month always exists")
        .pred_opt()
        .expect("last day of month");
        Self { start, end }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

// ============================================================================
// Auth
// ============================================================================

/// Sign-in request: an opaque credential from the identity provider
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "Credential cannot be empty"))]
    pub credential: String,
}

/// Sign-in response with the exchanged user id and an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub user_id: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// Goals
// ============================================================================

/// Create-goal request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGoalRequest {
    #[validate(length(min = 1, message = "Exercise id cannot be empty"))]
    pub exercise_id: String,
    pub goal_frequency: GoalFrequency,
    pub target_type: TargetType,
    #[validate(range(min = 1, message = "Target must be a positive number"))]
    pub target_value: i32,
}

/// Goal response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalResponse {
    pub id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub goal_frequency: GoalFrequency,
    pub target_type: TargetType,
    pub target_value: i32,
    pub date_set: DateTime<Utc>,
}

// ============================================================================
// Completed sets
// ============================================================================

/// Log-set request; `weight_added` is in the user's display unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSetRequest {
    pub exercise_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_added: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Edit-set request; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSetRequest {
    pub reps: Option<i32>,
    pub duration_seconds: Option<f64>,
    /// Display units, converted at the boundary
    pub weight_added: Option<f64>,
    pub user_completed_at: Option<String>,
    pub notes: Option<String>,
}

/// Completed-set response; weight reported in the user's display unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetResponse {
    pub id: String,
    pub exercise_id: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub reps: Option<i32>,
    pub duration_seconds: Option<f64>,
    pub weight_added: Option<f64>,
    pub weight_unit: WeightUnit,
    pub user_completed_at: Option<String>,
    pub notes: Option<String>,
}

/// Pre-fill data for the weight field of the next set entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastWeightResponse {
    pub exercise_id: String,
    pub weight_added: Option<f64>,
    pub weight_unit: WeightUnit,
}

/// Query parameters for listing sets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetsQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Per-exercise totals for one day of the daily log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseStatsResponse {
    pub exercise_id: String,
    pub exercise_name: String,
    pub total_sets: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_reps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_duration_seconds: Option<f64>,
}

/// Daily log: one day's sets grouped by exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLogResponse {
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseStatsResponse>,
    pub sets: Vec<SetResponse>,
}

// ============================================================================
// Preferences
// ============================================================================

/// Merge-update request for user preferences; absent fields are untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub quick_log_exercises: Option<BTreeMap<u8, String>>,
    pub weight_unit: Option<WeightUnit>,
    pub theme: Option<Theme>,
}

/// Preferences response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub quick_log_exercises: BTreeMap<u8, String>,
    pub weight_unit: WeightUnit,
    pub theme: Theme,
}

// ============================================================================
// Dashboard
// ============================================================================

/// Dashboard snapshot for the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub active_exercise_name: String,
    pub has_active_goal: bool,
    pub goal_total: i32,
    pub goal_progress: i32,
    pub goal_units: String,
    pub sets_completed_today: u32,
}

/// Calendar query: which month to bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

/// One calendar day with its indicator data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDayResponse {
    pub date: NaiveDate,
    pub set_count: u32,
    /// Movement patterns logged that day, for indicator dots
    pub patterns: Vec<MovementPattern>,
}

/// Month of calendar days that have at least one logged set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDayResponse>,
}

// ============================================================================
// Exercise catalog
// ============================================================================

/// Query parameters for the exercise picker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExercisesQuery {
    pub q: Option<String>,
    pub movement_pattern: Option<MovementPattern>,
    pub body_part: Option<BodyPart>,
}

/// Create a user-authored exercise; its id is derived from the name
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateExerciseRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,
    pub metric: crate::models::MetricType,
    pub primary_target: Option<BodyPart>,
    #[serde(default)]
    pub other_targets: Vec<BodyPart>,
    pub movement_pattern: Option<MovementPattern>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_range_covers_whole_month() {
        let range = DateRange::month_of(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }

    #[test]
    fn month_range_handles_december() {
        let range = DateRange::month_of(NaiveDate::from_ymd_opt(2023, 12, 25).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn month_range_handles_leap_february() {
        let range = DateRange::month_of(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn create_goal_request_validates_target() {
        let req = CreateGoalRequest {
            exercise_id: "pull_ups".to_string(),
            goal_frequency: GoalFrequency::Daily,
            target_type: TargetType::Reps,
            target_value: 0,
        };
        assert!(validator::Validate::validate(&req).is_err());
    }
}
