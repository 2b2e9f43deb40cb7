//! Data models for the Greasing the Groove sync backend
//!
//! These are the canonical shapes of the persisted documents. Enum-valued
//! fields are closed tagged types: an unknown wire value is a deserialization
//! error, never a silent default.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub use crate::units::WeightUnit;

/// How an exercise is measured: by repetition count or by held duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricType {
    Reps,
    Isometrics,
}

impl MetricType {
    /// Name of the input field this metric requires on a logged set
    pub fn required_field(&self) -> &'static str {
        match self {
            MetricType::Reps => "reps",
            MetricType::Isometrics => "duration_seconds",
        }
    }
}

/// Body part targeted by an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyPart {
    Back,
    Chest,
    Arms,
    Legs,
    Core,
}

/// Biomechanical category used for calendar indicator coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementPattern {
    Push,
    Pull,
    Squat,
    Lunge,
    Hinge,
    CoreAndCarry,
}

/// An exercise definition
///
/// Predefined entries live in the in-process catalog and are immutable;
/// user-authored entries (`is_custom`) are persisted remotely. Lookup by id
/// checks the catalog first, then falls back to the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub metric: MetricType,
    #[serde(default)]
    pub is_custom: bool,
    pub primary_target: Option<BodyPart>,
    #[serde(default)]
    pub other_targets: Vec<BodyPart>,
    pub movement_pattern: Option<MovementPattern>,
}

impl Exercise {
    /// Whether the exercise targets the given body part, primarily or otherwise
    pub fn targets(&self, part: BodyPart) -> bool {
        self.primary_target == Some(part) || self.other_targets.contains(&part)
    }
}

/// Goal cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalFrequency {
    Daily,
    Weekly,
}

/// What a goal's target value counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetType {
    Sets,
    Reps,
    Seconds,
    Minutes,
}

impl TargetType {
    /// Display units for progress rendered against this target type
    pub fn units(&self) -> &'static str {
        match self {
            TargetType::Sets => "sets",
            TargetType::Reps => "reps",
            TargetType::Seconds => "seconds",
            TargetType::Minutes => "minutes",
        }
    }
}

/// A user's goal for one exercise
///
/// Goals are append-only: creating a new goal supersedes older ones by
/// `date_set` recency. The store's active-goal query takes the most recent
/// document; no uniqueness is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveGoal {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_id: String,
    pub goal_frequency: GoalFrequency,
    pub target_type: TargetType,
    pub target_value: i32,
    pub date_set: DateTime<Utc>,
}

/// One logged set
///
/// `date` buckets the set into a user-local calendar day; `timestamp` orders
/// sets within a day. `weight_added_lb` is always pounds — unit conversion is
/// a boundary concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedSet {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_id: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub reps: Option<i32>,
    pub duration_seconds: Option<f64>,
    pub weight_added_lb: Option<f64>,
    pub user_completed_at: Option<String>,
    pub notes: Option<String>,
}

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Number of quick-log shortcut slots
pub const QUICK_LOG_SLOTS: u8 = 4;

/// Per-user preferences document, merge-upserted on change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub user_id: String,
    /// Slot index -> exercise id
    pub quick_log_exercises: BTreeMap<u8, String>,
    pub weight_unit: WeightUnit,
    pub theme: Theme,
}

impl UserPreferences {
    /// Defaults applied when the user has no preferences document
    pub fn defaults_for(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            quick_log_exercises: default_quick_log_slots(),
            weight_unit: WeightUnit::Lb,
            theme: Theme::System,
        }
    }
}

/// Fixed exercise set mapped into slots 0..=3 when no preferences exist
pub fn default_quick_log_slots() -> BTreeMap<u8, String> {
    [(0, "pull_ups"), (1, "push_ups"), (2, "squats"), (3, "plank")]
        .into_iter()
        .map(|(slot, id)| (slot, id.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_type_rejects_unknown_values() {
        assert!(serde_json::from_str::<MetricType>("\"REPS\"").is_ok());
        assert!(serde_json::from_str::<MetricType>("\"ISOMETRICS\"").is_ok());
        assert!(serde_json::from_str::<MetricType>("\"DURATION\"").is_err());
    }

    #[test]
    fn target_type_rejects_unknown_values() {
        assert!(serde_json::from_str::<TargetType>("\"SETS\"").is_ok());
        assert!(serde_json::from_str::<TargetType>("\"HOURS\"").is_err());
    }

    #[test]
    fn theme_wire_values_are_capitalized_words() {
        assert_eq!(serde_json::to_string(&Theme::System).unwrap(), "\"System\"");
        assert_eq!(
            serde_json::from_str::<Theme>("\"Dark\"").unwrap(),
            Theme::Dark
        );
        assert!(serde_json::from_str::<Theme>("\"dark\"").is_err());
    }

    #[test]
    fn completed_set_date_serializes_as_iso_day() {
        let set = CompletedSet {
            id: Uuid::nil(),
            user_id: "u1".to_string(),
            exercise_id: "pull_ups".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            timestamp: Utc::now(),
            reps: Some(10),
            duration_seconds: None,
            weight_added_lb: None,
            user_completed_at: None,
            notes: None,
        };
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["date"], "2024-03-05");
    }

    #[test]
    fn default_preferences_fill_all_slots() {
        let prefs = UserPreferences::defaults_for("u1");
        assert_eq!(prefs.quick_log_exercises.len(), QUICK_LOG_SLOTS as usize);
        assert_eq!(prefs.weight_unit, WeightUnit::Lb);
        assert_eq!(prefs.theme, Theme::System);
        assert_eq!(prefs.quick_log_exercises[&0], "pull_ups");
    }

    #[test]
    fn exercise_targets_checks_primary_and_others() {
        let ex = Exercise {
            id: "push_ups".to_string(),
            name: "Push-ups".to_string(),
            metric: MetricType::Reps,
            is_custom: false,
            primary_target: Some(BodyPart::Chest),
            other_targets: vec![BodyPart::Arms, BodyPart::Core],
            movement_pattern: Some(MovementPattern::Push),
        };
        assert!(ex.targets(BodyPart::Chest));
        assert!(ex.targets(BodyPart::Core));
        assert!(!ex.targets(BodyPart::Legs));
    }
}
