//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod meals;
pub mod profile;

pub use meals::{DailyTotals, MealLogRepository, MealLogRow};
pub use profile::{Profile, ProfileRepository};
