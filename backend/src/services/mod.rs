//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod analysis;
pub mod meals;
pub mod targets;

pub use analysis::{AnalysisService, DisabledAnalyzer, GeminiAnalyzer, NutritionAnalyzer};
pub use meals::MealService;
pub use targets::TargetService;
