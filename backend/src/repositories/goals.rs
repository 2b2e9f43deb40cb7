//! Active-goal repository
//!
//! Goals are append-only. The active goal is the most recent document by
//! `date_set` for a user; older goals are superseded, never deleted.

use super::wire;
use anyhow::Result;
use chrono::{DateTime, Utc};
use groove_shared::models::{ActiveGoal, GoalFrequency, TargetType};
use sqlx::PgPool;
use uuid::Uuid;

/// Goal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_id: String,
    pub goal_frequency: String,
    pub target_type: String,
    pub target_value: i32,
    pub date_set: DateTime<Utc>,
}

impl GoalRecord {
    /// Convert into the domain model, rejecting unknown enum values
    pub fn into_model(self) -> Result<ActiveGoal> {
        Ok(ActiveGoal {
            id: self.id,
            user_id: self.user_id,
            exercise_id: self.exercise_id,
            goal_frequency: wire::from_str(&self.goal_frequency)?,
            target_type: wire::from_str(&self.target_type)?,
            target_value: self.target_value,
            date_set: self.date_set,
        })
    }
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct CreateGoal {
    pub user_id: String,
    pub exercise_id: String,
    pub goal_frequency: GoalFrequency,
    pub target_type: TargetType,
    pub target_value: i32,
}

/// Goal repository
pub struct GoalRepository;

impl GoalRepository {
    /// Append a new goal; prior goals are left in place
    pub async fn create(pool: &PgPool, input: CreateGoal) -> Result<ActiveGoal> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            INSERT INTO active_goals (user_id, exercise_id, goal_frequency, target_type, target_value)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, exercise_id, goal_frequency, target_type, target_value, date_set
            "#,
        )
        .bind(&input.user_id)
        .bind(&input.exercise_id)
        .bind(wire::to_str(&input.goal_frequency)?)
        .bind(wire::to_str(&input.target_type)?)
        .bind(input.target_value)
        .fetch_one(pool)
        .await?;

        record.into_model()
    }

    /// Most recent goal for a user, if any (userId equality, dateSet desc, limit 1)
    pub async fn latest_for_user(pool: &PgPool, user_id: &str) -> Result<Option<ActiveGoal>> {
        let record = sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id, user_id, exercise_id, goal_frequency, target_type, target_value, date_set
            FROM active_goals
            WHERE user_id = $1
            ORDER BY date_set DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        record.map(GoalRecord::into_model).transpose()
    }
}
