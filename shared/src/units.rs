//! Weight unit conversion and duration formatting
//!
//! Added weight is stored in pounds everywhere; kilogram conversion happens
//! only at read/write boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pounds per kilogram, the single conversion factor used at boundaries
pub const LB_PER_KG: f64 = 2.20462;

/// Weight unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightUnit {
    #[default]
    Lb,
    Kg,
}

impl WeightUnit {
    /// Convert a value in this unit to canonical pounds
    pub fn to_lb(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Lb => value,
            WeightUnit::Kg => value * LB_PER_KG,
        }
    }

    /// Convert canonical pounds to a value in this unit
    pub fn from_lb(&self, lb: f64) -> f64 {
        match self {
            WeightUnit::Lb => lb,
            WeightUnit::Kg => lb / LB_PER_KG,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Lb => "lb",
            WeightUnit::Kg => "kg",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lb),
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

/// Format a held duration for display, e.g. `90.0` -> `"1m 30s"`
pub fn format_duration_seconds(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let minutes = total / 60;
    let secs = total % 60;
    if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: storing a kg entry and displaying it back recovers the value
        #[test]
        fn prop_kg_roundtrip(kg in 0.5f64..300.0) {
            let lb = WeightUnit::Kg.to_lb(kg);
            let back = WeightUnit::Kg.from_lb(lb);
            prop_assert!((kg - back).abs() < 0.0001,
                "Round-trip failed: {} -> {} -> {}", kg, lb, back);
        }

        /// Property: pound entries are stored as-is
        #[test]
        fn prop_lb_identity(lb in 0.5f64..600.0) {
            prop_assert_eq!(WeightUnit::Lb.to_lb(lb), lb);
            prop_assert_eq!(WeightUnit::Lb.from_lb(lb), lb);
        }
    }

    #[test]
    fn test_known_conversions() {
        // 1 kg = 2.20462 lb
        assert!((WeightUnit::Kg.to_lb(1.0) - 2.20462).abs() < 1e-9);
        // 10 lb displayed in kg
        assert!((WeightUnit::Kg.from_lb(10.0) - 4.5359).abs() < 0.001);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("lb".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        assert_eq!("pounds".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        assert_eq!("KG".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert!("stone".parse::<WeightUnit>().is_err());
    }

    #[test]
    fn test_wire_values() {
        assert_eq!(serde_json::to_string(&WeightUnit::Lb).unwrap(), "\"LB\"");
        assert_eq!(
            serde_json::from_str::<WeightUnit>("\"KG\"").unwrap(),
            WeightUnit::Kg
        );
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration_seconds(45.0), "45s");
        assert_eq!(format_duration_seconds(90.0), "1m 30s");
        assert_eq!(format_duration_seconds(600.4), "10m 0s");
        assert_eq!(format_duration_seconds(-3.0), "0s");
    }
}
