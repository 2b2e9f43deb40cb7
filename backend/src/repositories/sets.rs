//! Completed-set repository
//!
//! One row per logged set. `date` is the user-local calendar day used for
//! bucketing; `timestamp` is server time and orders sets within a day.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use groove_shared::models::CompletedSet;
use sqlx::PgPool;
use uuid::Uuid;

/// Completed-set record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SetRecord {
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

impl From<SetRecord> for CompletedSet {
    fn from(r: SetRecord) -> Self {
        CompletedSet {
            id: r.id,
            user_id: r.user_id,
            exercise_id: r.exercise_id,
            date: r.date,
            timestamp: r.timestamp,
            reps: r.reps,
            duration_seconds: r.duration_seconds,
            weight_added_lb: r.weight_added_lb,
            user_completed_at: r.user_completed_at,
            notes: r.notes,
        }
    }
}

/// Input for logging a set; weight is already canonical pounds
#[derive(Debug, Clone)]
pub struct CreateSet {
    pub user_id: String,
    pub exercise_id: String,
    pub date: NaiveDate,
    pub reps: Option<i32>,
    pub duration_seconds: Option<f64>,
    pub weight_added_lb: Option<f64>,
    pub user_completed_at: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for an existing set; absent fields are untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateSet {
    pub reps: Option<i32>,
    pub duration_seconds: Option<f64>,
    pub weight_added_lb: Option<f64>,
    pub user_completed_at: Option<String>,
    pub notes: Option<String>,
}

const SET_COLUMNS: &str = "id, user_id, exercise_id, date, timestamp, reps, duration_seconds, \
                           weight_added_lb, user_completed_at, notes";

/// Completed-set repository
pub struct SetRepository;

impl SetRepository {
    /// Append a set with a server-assigned timestamp
    pub async fn create(pool: &PgPool, input: CreateSet) -> Result<CompletedSet> {
        let record = sqlx::query_as::<_, SetRecord>(&format!(
            r#"
            INSERT INTO completed_sets
                (user_id, exercise_id, date, reps, duration_seconds, weight_added_lb,
                 user_completed_at, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SET_COLUMNS}
            "#,
        ))
        .bind(&input.user_id)
        .bind(&input.exercise_id)
        .bind(input.date)
        .bind(input.reps)
        .bind(input.duration_seconds)
        .bind(input.weight_added_lb)
        .bind(&input.user_completed_at)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record.into())
    }

    /// One set by id, scoped to its owner
    pub async fn get_by_id(pool: &PgPool, id: Uuid, user_id: &str) -> Result<Option<CompletedSet>> {
        let record = sqlx::query_as::<_, SetRecord>(&format!(
            r#"SELECT {SET_COLUMNS} FROM completed_sets WHERE id = $1 AND user_id = $2"#,
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// All sets with `date` in `[start, end]` inclusive, newest first
    pub async fn in_range(
        pool: &PgPool,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<CompletedSet>> {
        let records = sqlx::query_as::<_, SetRecord>(&format!(
            r#"
            SELECT {SET_COLUMNS}
            FROM completed_sets
            WHERE user_id = $1 AND date >= $2 AND date <= $3
            ORDER BY timestamp DESC
            "#,
        ))
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// In-place partial update; returns None when the set does not exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: &str,
        updates: UpdateSet,
    ) -> Result<Option<CompletedSet>> {
        let record = sqlx::query_as::<_, SetRecord>(&format!(
            r#"
            UPDATE completed_sets SET
                reps = COALESCE($3, reps),
                duration_seconds = COALESCE($4, duration_seconds),
                weight_added_lb = COALESCE($5, weight_added_lb),
                user_completed_at = COALESCE($6, user_completed_at),
                notes = COALESCE($7, notes)
            WHERE id = $1 AND user_id = $2
            RETURNING {SET_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .bind(updates.reps)
        .bind(updates.duration_seconds)
        .bind(updates.weight_added_lb)
        .bind(&updates.user_completed_at)
        .bind(&updates.notes)
        .fetch_optional(pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// Remove a set; true when a row was deleted
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: &str) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM completed_sets WHERE id = $1 AND user_id = $2"#)
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
