//! API request and response types

use crate::food_catalog::FoodItem;
use crate::intake::IntakeSummary;
use crate::meals::{MealEntry, MealSource, MealType};
use crate::nutrients::NutrientTotals;
use crate::targets::{DailyTargets, EnergyBreakdown, UserStats, UserStatsInput};
use crate::validation::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inclusive date range for queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn validate_order(&self) -> Result<(), ValidationError> {
        if self.end < self.start {
            return Err(ValidationError::new("end", "must not be before start"));
        }
        Ok(())
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Targets
// ============================================================================

/// Target calculation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTargetsRequest {
    pub stats: UserStatsInput,
    /// Year used for the age calculation; defaults to the current year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,
}

/// Target calculation response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateTargetsResponse {
    pub targets: DailyTargets,
    pub breakdown: EnergyBreakdown,
    pub reference_year: i32,
}

/// Stored profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub stats: UserStats,
    pub targets: DailyTargets,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Food catalog
// ============================================================================

/// Catalog search query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodSearchQuery {
    pub q: Option<String>,
    /// Comma-separated favorite food ids
    pub favorites: Option<String>,
}

impl FoodSearchQuery {
    pub fn term(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }

    pub fn favorite_ids(&self) -> Vec<&str> {
        self.favorites
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Portion query
#[derive(Debug, Clone, Deserialize)]
pub struct PortionQuery {
    /// Serving size in grams
    pub serving: f64,
}

/// Portioned catalog item
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortionResponse {
    pub food: FoodItem,
    pub serving_size: f64,
    pub nutrients: NutrientTotals,
}

// ============================================================================
// Meals
// ============================================================================

/// Manual or photo-confirmed meal
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub meal_type: String,
    #[validate(length(min = 1, max = 100))]
    pub menu_name: String,
    #[validate(range(min = 0.0, max = 50000.0))]
    pub calories: f64,
    #[validate(range(min = 0.0, max = 50000.0))]
    pub carbs: f64,
    #[validate(range(min = 0.0, max = 50000.0))]
    pub protein: f64,
    #[validate(range(min = 0.0, max = 50000.0))]
    pub fat: f64,
    #[validate(range(min = 0.0, max = 50000.0))]
    pub sugar: f64,
    #[validate(range(min = 0.0, max = 50000.0))]
    pub sodium: f64,
    /// `manual` (default) or `photo`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Day to log against; defaults to today
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl CreateMealRequest {
    /// Build a validated entry from the request
    pub fn to_entry(&self) -> Result<MealEntry, ValidationError> {
        let meal_type: MealType = self.meal_type.parse()?;
        let source = match self.source.as_deref() {
            None => MealSource::Manual,
            Some(raw) => match raw.parse()? {
                MealSource::Catalog => {
                    return Err(ValidationError::new(
                        "source",
                        "catalog meals are logged through the catalog endpoint",
                    ))
                }
                other => other,
            },
        };
        let nutrients = NutrientTotals {
            calories: self.calories,
            carbs: self.carbs,
            protein: self.protein,
            fat: self.fat,
            sugar: self.sugar,
            sodium: self.sodium,
        };
        MealEntry::new(meal_type, &self.menu_name, nutrients, source)
    }
}

/// Meal portioned from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMealRequest {
    #[validate(length(min = 1))]
    pub food_id: String,
    pub serving_size: f64,
    pub meal_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Single-day query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

/// Totals for one day, compared against stored targets when a profile exists
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIntakeResponse {
    pub date: NaiveDate,
    pub meals_logged: i64,
    pub consumed: NutrientTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<IntakeSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<NutrientTotals>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub over_target: Vec<String>,
}
