//! Meal log domain model

use crate::nutrients::NutrientTotals;
use crate::validation::{validate_menu_name, validate_nutrient_amount, ValidationError, VALID_MEAL_TYPES};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(ValidationError::new(
                "mealType",
                &format!("must be one of: {}", VALID_MEAL_TYPES.join(", ")),
            )),
        }
    }
}

/// How a meal's nutrients were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSource {
    /// Typed in by the user
    Manual,
    /// Portioned from the food catalog
    Catalog,
    /// Confirmed from a photo estimate
    Photo,
}

impl MealSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSource::Manual => "manual",
            MealSource::Catalog => "catalog",
            MealSource::Photo => "photo",
        }
    }
}

impl fmt::Display for MealSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manual" => Ok(MealSource::Manual),
            "catalog" => Ok(MealSource::Catalog),
            "photo" => Ok(MealSource::Photo),
            _ => Err(ValidationError::new(
                "source",
                "must be one of: manual, catalog, photo",
            )),
        }
    }
}

/// A validated meal that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub meal_type: MealType,
    pub menu_name: String,
    pub nutrients: NutrientTotals,
    pub source: MealSource,
}

impl MealEntry {
    /// Validate and normalize a meal
    ///
    /// The menu name is trimmed. Every nutrient must be finite and non-negative.
    pub fn new(
        meal_type: MealType,
        menu_name: &str,
        nutrients: NutrientTotals,
        source: MealSource,
    ) -> Result<Self, ValidationError> {
        validate_menu_name(menu_name).map_err(|m| ValidationError::new("menuName", &m))?;
        for (field, value) in nutrients.fields() {
            validate_nutrient_amount(value).map_err(|m| ValidationError::new(field, &m))?;
        }

        Ok(MealEntry {
            meal_type,
            menu_name: menu_name.trim().to_string(),
            nutrients,
            source,
        })
    }
}

/// A stored meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLog {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub meal_type: MealType,
    pub menu_name: String,
    #[serde(flatten)]
    pub nutrients: NutrientTotals,
    pub source: MealSource,
    pub created_at: DateTime<Utc>,
}
