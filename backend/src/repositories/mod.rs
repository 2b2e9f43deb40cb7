//! Data access layer
//!
//! Each repository maps one document collection onto its PostgreSQL table.
//! Enum-valued columns are stored as their wire strings; converting back goes
//! through the closed serde types, so an unknown stored value is an error,
//! never a silent default.

pub mod exercises;
pub mod goals;
pub mod preferences;
pub mod sets;

pub(crate) mod wire {
    use anyhow::{Context, Result};
    use serde::de::DeserializeOwned;
    use serde::Serialize;

    /// Convert a unit-enum value to its wire string
    pub fn to_str<T: Serialize>(value: &T) -> Result<String> {
        match serde_json::to_value(value)? {
            serde_json::Value::String(s) => Ok(s),
            other => anyhow::bail!("expected string wire form, got {}", other),
        }
    }

    /// Parse a wire string back into a closed enum, rejecting unknown values
    pub fn from_str<T: DeserializeOwned>(s: &str) -> Result<T> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .with_context(|| format!("unknown wire value: {}", s))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use groove_shared::models::{GoalFrequency, TargetType};

        #[test]
        fn round_trips_enum_wire_strings() {
            assert_eq!(to_str(&GoalFrequency::Daily).unwrap(), "DAILY");
            assert_eq!(
                from_str::<TargetType>("MINUTES").unwrap(),
                TargetType::Minutes
            );
        }

        #[test]
        fn rejects_unknown_wire_value() {
            assert!(from_str::<TargetType>("FORTNIGHTS").is_err());
        }
    }
}
