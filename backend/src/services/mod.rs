//! Business logic layer
//!
//! Services sit between the routes and the store: they validate input,
//! resolve exercise ids, convert units at the boundary, and publish change
//! events after every successful write.

pub mod dashboard;
pub mod exercises;
pub mod goals;
pub mod logs;
pub mod preferences;
pub mod session;

pub use dashboard::DashboardAggregator;
pub use session::{Session, SessionRegistry};
