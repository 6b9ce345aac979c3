//! Diet Tracker Shared Library
//!
//! Domain logic shared by the backend service and the WASM bindings:
//! daily target calculation, nutrient aggregation, the food catalog and
//! photo-estimate parsing. Nothing in this crate performs I/O.

pub mod errors;
pub mod estimate;
pub mod food_catalog;
pub mod intake;
pub mod meals;
pub mod nutrients;
pub mod targets;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use estimate::{parse_estimate, NutritionEstimate, ANALYSIS_PROMPT};
pub use food_catalog::FoodItem;
pub use intake::{progress_percent, IntakeSummary};
pub use meals::{MealEntry, MealLog, MealSource, MealType};
pub use nutrients::{sum_totals, NutrientTotals};
pub use targets::*;
pub use types::*;
