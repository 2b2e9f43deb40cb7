//! Greasing the Groove Shared Library
//!
//! This crate contains the domain model, predefined exercise catalog, unit
//! conversion, and API types shared between the backend and clients.

pub mod catalog;
pub mod errors;
pub mod models;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use types::*;

// Export units module items (canonical source for unit types)
pub use units::*;

// Export models (weight unit re-exported from units)
pub use models::{
    ActiveGoal, BodyPart, CompletedSet, Exercise, GoalFrequency, MetricType, MovementPattern,
    TargetType, Theme, UserPreferences,
};
