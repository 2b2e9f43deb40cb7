//! Custom-exercise repository
//!
//! Remote fallback for exercise-id resolution: the in-process catalog is
//! consulted first, and only user-authored ids reach this table.

use super::wire;
use anyhow::{Context, Result};
use groove_shared::models::{BodyPart, Exercise, MetricType, MovementPattern};
use sqlx::PgPool;

/// Custom-exercise record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CustomExerciseRecord {
    pub id: String,
    pub name: String,
    pub metric: String,
    pub primary_target: Option<String>,
    pub other_targets: serde_json::Value,
    pub movement_pattern: Option<String>,
}

impl CustomExerciseRecord {
    /// Convert into the domain model, rejecting unknown enum values
    pub fn into_model(self) -> Result<Exercise> {
        Ok(Exercise {
            id: self.id,
            name: self.name,
            metric: wire::from_str(&self.metric)?,
            is_custom: true,
            primary_target: self
                .primary_target
                .as_deref()
                .map(wire::from_str::<BodyPart>)
                .transpose()?,
            other_targets: serde_json::from_value(self.other_targets)
                .context("invalid other_targets list")?,
            movement_pattern: self
                .movement_pattern
                .as_deref()
                .map(wire::from_str::<MovementPattern>)
                .transpose()?,
        })
    }
}

/// Input for creating a custom exercise
#[derive(Debug, Clone)]
pub struct CreateCustomExercise {
    pub id: String,
    pub name: String,
    pub metric: MetricType,
    pub primary_target: Option<BodyPart>,
    pub other_targets: Vec<BodyPart>,
    pub movement_pattern: Option<MovementPattern>,
}

/// Custom-exercise repository
pub struct ExerciseRepository;

impl ExerciseRepository {
    /// One custom exercise by id, scoped to its owner
    pub async fn get_by_id(pool: &PgPool, user_id: &str, id: &str) -> Result<Option<Exercise>> {
        let record = sqlx::query_as::<_, CustomExerciseRecord>(
            r#"
            SELECT id, name, metric, primary_target, other_targets, movement_pattern
            FROM custom_exercises
            WHERE user_id = $1 AND id = $2
            "#,
        )
        .bind(user_id)
        .bind(id)
        .fetch_optional(pool)
        .await?;

        record.map(CustomExerciseRecord::into_model).transpose()
    }

    /// All custom exercises for a user, sorted by name
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<Exercise>> {
        let records = sqlx::query_as::<_, CustomExerciseRecord>(
            r#"
            SELECT id, name, metric, primary_target, other_targets, movement_pattern
            FROM custom_exercises
            WHERE user_id = $1
            ORDER BY name
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        records
            .into_iter()
            .map(CustomExerciseRecord::into_model)
            .collect()
    }

    /// Create a custom exercise for a user
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        input: CreateCustomExercise,
    ) -> Result<Exercise> {
        let other_targets = input
            .other_targets
            .iter()
            .map(wire::to_str)
            .collect::<Result<Vec<_>>>()?;

        let record = sqlx::query_as::<_, CustomExerciseRecord>(
            r#"
            INSERT INTO custom_exercises
                (user_id, id, name, metric, primary_target, other_targets, movement_pattern)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, metric, primary_target, other_targets, movement_pattern
            "#,
        )
        .bind(user_id)
        .bind(&input.id)
        .bind(&input.name)
        .bind(wire::to_str(&input.metric)?)
        .bind(
            input
                .primary_target
                .as_ref()
                .map(wire::to_str)
                .transpose()?,
        )
        .bind(serde_json::Value::Array(
            other_targets.into_iter().map(Into::into).collect(),
        ))
        .bind(
            input
                .movement_pattern
                .as_ref()
                .map(wire::to_str)
                .transpose()?,
        )
        .fetch_one(pool)
        .await?;

        record.into_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_converts_with_custom_flag_set() {
        let record = CustomExerciseRecord {
            id: "weighted_carries".to_string(),
            name: "Weighted Carries".to_string(),
            metric: "ISOMETRICS".to_string(),
            primary_target: Some("CORE".to_string()),
            other_targets: serde_json::json!(["ARMS"]),
            movement_pattern: Some("CORE_AND_CARRY".to_string()),
        };
        let exercise = record.into_model().unwrap();
        assert!(exercise.is_custom);
        assert_eq!(exercise.metric, MetricType::Isometrics);
        assert_eq!(exercise.primary_target, Some(BodyPart::Core));
        assert_eq!(exercise.other_targets, vec![BodyPart::Arms]);
        assert_eq!(
            exercise.movement_pattern,
            Some(MovementPattern::CoreAndCarry)
        );
    }

    #[test]
    fn record_with_unknown_metric_is_rejected() {
        let record = CustomExerciseRecord {
            id: "x".to_string(),
            name: "X".to_string(),
            metric: "DISTANCE".to_string(),
            primary_target: None,
            other_targets: serde_json::json!([]),
            movement_pattern: None,
        };
        assert!(record.into_model().is_err());
    }
}
