//! User-preferences repository
//!
//! A single document per user, merge-upserted: fields absent from an update
//! keep their stored value, and quick-log slots are merged per slot rather
//! than replaced wholesale. A user with no row gets the defaults.

use super::wire;
use anyhow::{Context, Result};
use groove_shared::models::{Theme, UserPreferences, WeightUnit};
use sqlx::PgPool;
use std::collections::BTreeMap;

/// Preferences record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PreferencesRecord {
    pub user_id: String,
    pub quick_log_exercises: serde_json::Value,
    pub weight_unit: String,
    pub theme: String,
}

impl PreferencesRecord {
    /// Convert into the domain model, rejecting unknown enum values
    pub fn into_model(self) -> Result<UserPreferences> {
        Ok(UserPreferences {
            user_id: self.user_id,
            quick_log_exercises: slots_from_json(self.quick_log_exercises)?,
            weight_unit: wire::from_str(&self.weight_unit)?,
            theme: wire::from_str(&self.theme)?,
        })
    }
}

/// Partial preferences update; absent fields are untouched
#[derive(Debug, Clone, Default)]
pub struct PreferencesUpdate {
    /// Slot assignments to merge into the stored map
    pub quick_log_exercises: Option<BTreeMap<u8, String>>,
    pub weight_unit: Option<WeightUnit>,
    pub theme: Option<Theme>,
}

fn slots_to_json(slots: &BTreeMap<u8, String>) -> serde_json::Value {
    serde_json::Value::Object(
        slots
            .iter()
            .map(|(slot, id)| (slot.to_string(), serde_json::Value::String(id.clone())))
            .collect(),
    )
}

fn slots_from_json(value: serde_json::Value) -> Result<BTreeMap<u8, String>> {
    let object = value
        .as_object()
        .context("quick_log_exercises is not an object")?;
    object
        .iter()
        .map(|(key, value)| {
            let slot: u8 = key
                .parse()
                .with_context(|| format!("invalid slot index: {}", key))?;
            let id = value
                .as_str()
                .with_context(|| format!("slot {} value is not a string", key))?;
            Ok((slot, id.to_string()))
        })
        .collect()
}

/// Preferences repository
pub struct PreferencesRepository;

impl PreferencesRepository {
    /// Stored preferences, or the defaults when the user has no row
    pub async fn get_or_defaults(pool: &PgPool, user_id: &str) -> Result<UserPreferences> {
        let record = sqlx::query_as::<_, PreferencesRecord>(
            r#"
            SELECT user_id, quick_log_exercises, weight_unit, theme
            FROM user_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        match record {
            Some(record) => record.into_model(),
            None => Ok(UserPreferences::defaults_for(user_id)),
        }
    }

    /// Merge an update into the stored document and return the result
    ///
    /// Creating the row on first write starts from the defaults so a partial
    /// first update still yields a complete document.
    pub async fn merge_upsert(
        pool: &PgPool,
        user_id: &str,
        update: PreferencesUpdate,
    ) -> Result<UserPreferences> {
        let mut current = Self::get_or_defaults(pool, user_id).await?;

        if let Some(slots) = update.quick_log_exercises {
            current.quick_log_exercises.extend(slots);
        }
        if let Some(unit) = update.weight_unit {
            current.weight_unit = unit;
        }
        if let Some(theme) = update.theme {
            current.theme = theme;
        }

        let record = sqlx::query_as::<_, PreferencesRecord>(
            r#"
            INSERT INTO user_preferences (user_id, quick_log_exercises, weight_unit, theme)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                quick_log_exercises = EXCLUDED.quick_log_exercises,
                weight_unit = EXCLUDED.weight_unit,
                theme = EXCLUDED.theme,
                updated_at = NOW()
            RETURNING user_id, quick_log_exercises, weight_unit, theme
            "#,
        )
        .bind(user_id)
        .bind(slots_to_json(&current.quick_log_exercises))
        .bind(wire::to_str(&current.weight_unit)?)
        .bind(wire::to_str(&current.theme)?)
        .fetch_one(pool)
        .await?;

        record.into_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groove_shared::models::default_quick_log_slots;

    #[test]
    fn slots_round_trip_through_json() {
        let slots = default_quick_log_slots();
        let json = slots_to_json(&slots);
        assert_eq!(slots_from_json(json).unwrap(), slots);
    }

    #[test]
    fn slots_reject_non_numeric_keys() {
        let json = serde_json::json!({"first": "pull_ups"});
        assert!(slots_from_json(json).is_err());
    }

    #[test]
    fn record_with_unknown_theme_is_rejected() {
        let record = PreferencesRecord {
            user_id: "u1".to_string(),
            quick_log_exercises: slots_to_json(&default_quick_log_slots()),
            weight_unit: "LB".to_string(),
            theme: "Sepia".to_string(),
        };
        assert!(record.into_model().is_err());
    }

    #[test]
    fn record_converts_to_model() {
        let record = PreferencesRecord {
            user_id: "u1".to_string(),
            quick_log_exercises: serde_json::json!({"0": "dips", "2": "plank"}),
            weight_unit: "KG".to_string(),
            theme: "Dark".to_string(),
        };
        let prefs = record.into_model().unwrap();
        assert_eq!(prefs.weight_unit, WeightUnit::Kg);
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.quick_log_exercises[&2], "plank");
    }
}
