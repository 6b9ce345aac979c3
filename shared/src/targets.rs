//! Daily nutrient target calculations
//!
//! Derives a person's daily energy and macronutrient budget from body stats,
//! activity level and dietary goal.
//!
//! # Formulas
//!
//! 1. **BMR** (Mifflin-St Jeor): `10 × weight(kg) + 6.25 × height(cm) − 5 × age + 5 (male) / −161 (female)`
//! 2. **TDEE**: `BMR × activity multiplier`
//! 3. **Goal**: cut `−500 kcal`, maintain `±0`, bulk `+300 kcal`
//! 4. **Protein**: `2.2 g/kg`, **Fat**: `0.9 g/kg`, both independent of goal
//! 5. **Carbohydrate**: whatever energy remains, floored at zero
//! 6. **Sugar / sodium**: fixed guideline ceilings
//!
//! Only the final outputs are rounded (half away from zero). The reference
//! year is always passed in; nothing here reads the clock.

use crate::errors::TargetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Protein grams per kilogram of body weight
pub const PROTEIN_G_PER_KG: f64 = 2.2;
/// Fat grams per kilogram of body weight
pub const FAT_G_PER_KG: f64 = 0.9;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Daily added-sugar ceiling in grams
pub const SUGAR_CAP_G: u32 = 30;
/// Daily sodium ceiling in milligrams
pub const SODIUM_CAP_MG: u32 = 2000;

// ============================================================================
// Input Types
// ============================================================================

/// Gender used by the BMR equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Constant term of the Mifflin-St Jeor equation
    pub fn bmr_offset(&self) -> f64 {
        match self {
            Gender::Male => 5.0,
            Gender::Female => -161.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(TargetError::invalid(
                "gender",
                format!("unknown gender '{other}', expected one of: male, female"),
            )),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or physical job
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Very hard exercise or physical job",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
            .ok_or_else(|| {
                TargetError::invalid(
                    "activityLevel",
                    format!(
                        "unknown activity level '{normalized}', expected one of: sedentary, light, moderate, active, very_active"
                    ),
                )
            })
    }
}

/// Dietary goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Energy deficit
    Cut,
    Maintain,
    /// Energy surplus
    Bulk,
}

impl Goal {
    /// Energy adjustment applied on top of TDEE, in kcal
    pub fn calorie_offset(&self) -> f64 {
        match self {
            Goal::Cut => -500.0,
            Goal::Maintain => 0.0,
            Goal::Bulk => 300.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Cut => "cut",
            Goal::Maintain => "maintain",
            Goal::Bulk => "bulk",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cut" => Ok(Goal::Cut),
            "maintain" => Ok(Goal::Maintain),
            "bulk" => Ok(Goal::Bulk),
            other => Err(TargetError::invalid(
                "goal",
                format!("unknown goal '{other}', expected one of: cut, maintain, bulk"),
            )),
        }
    }
}

/// Body stats used to derive daily targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub gender: Gender,
    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    pub birth_year: i32,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl UserStats {
    /// Age in whole years relative to `reference_year`
    ///
    /// Fails when the birth year lies after the reference year or the
    /// difference does not fit in an `i32`.
    pub fn age(&self, reference_year: i32) -> Result<i32, TargetError> {
        let age = reference_year.checked_sub(self.birth_year).ok_or_else(|| {
            TargetError::invalid(
                "birthYear",
                format!(
                    "birthYear {} is out of range for referenceYear {}",
                    self.birth_year, reference_year
                ),
            )
        })?;
        if age < 0 {
            return Err(TargetError::invalid(
                "birthYear",
                format!(
                    "birthYear {} is in the future relative to referenceYear {}",
                    self.birth_year, reference_year
                ),
            ));
        }
        Ok(age)
    }

    /// Check every constraint the calculator relies on
    pub fn validate(&self, reference_year: i32) -> Result<(), TargetError> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(TargetError::invalid(
                "height",
                format!("height must be a positive number of centimeters, got {}", self.height),
            ));
        }
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(TargetError::invalid(
                "weight",
                format!("weight must be a positive number of kilograms, got {}", self.weight),
            ));
        }
        self.age(reference_year)?;
        Ok(())
    }
}

/// Loosely typed stats as they arrive from clients
///
/// Enumerated fields are plain strings so that unknown values surface as
/// `TargetError::InvalidInput` naming the field rather than as a decoding error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsInput {
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub birth_year: i32,
    pub activity_level: String,
    pub goal: String,
}

impl TryFrom<UserStatsInput> for UserStats {
    type Error = TargetError;

    fn try_from(input: UserStatsInput) -> Result<Self, Self::Error> {
        Ok(UserStats {
            gender: input.gender.parse()?,
            height: input.height,
            weight: input.weight,
            birth_year: input.birth_year,
            activity_level: input.activity_level.parse()?,
            goal: input.goal.parse()?,
        })
    }
}

impl From<UserStats> for UserStatsInput {
    fn from(stats: UserStats) -> Self {
        UserStatsInput {
            gender: stats.gender.as_str().to_string(),
            height: stats.height,
            weight: stats.weight,
            birth_year: stats.birth_year,
            activity_level: stats.activity_level.as_str().to_string(),
            goal: stats.goal.as_str().to_string(),
        }
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// Daily nutrient targets
///
/// Serialized as a flat object with exactly these six keys. Units: kcal for
/// `calories`, grams for `carbs`/`protein`/`fat`/`sugar`, milligrams for `sodium`.
/// `sugar` and `sodium` are upper bounds rather than goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyTargets {
    pub calories: u32,
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
    pub sugar: u32,
    pub sodium: u32,
}

/// Unrounded energy figures behind a set of targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyBreakdown {
    pub age_years: i32,
    /// Basal Metabolic Rate
    pub bmr: f64,
    pub activity_multiplier: f64,
    /// Total Daily Energy Expenditure
    pub tdee: f64,
    /// TDEE after the goal adjustment
    pub target_calories: f64,
}

// ============================================================================
// Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years) + gender.bmr_offset()
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Validate stats and compute the unrounded energy figures
pub fn energy_breakdown(stats: &UserStats, reference_year: i32) -> Result<EnergyBreakdown, TargetError> {
    stats.validate(reference_year)?;

    let age_years = stats.age(reference_year)?;
    let bmr = calculate_bmr_mifflin(stats.weight, stats.height, age_years, stats.gender);
    let tdee = calculate_tdee(bmr, stats.activity_level);

    Ok(EnergyBreakdown {
        age_years,
        bmr,
        activity_multiplier: stats.activity_level.multiplier(),
        tdee,
        target_calories: tdee + stats.goal.calorie_offset(),
    })
}

/// Compute daily nutrient targets
///
/// Protein and fat are fixed per kilogram of body weight; carbohydrate takes
/// the remaining energy. When protein and fat alone exceed the goal-adjusted
/// energy, carbs floor at zero and the macro calories exceed `calories`.
pub fn compute_daily_targets(stats: &UserStats, reference_year: i32) -> Result<DailyTargets, TargetError> {
    let energy = energy_breakdown(stats, reference_year)?;
    Ok(targets_from_energy(stats, &energy))
}

/// Compute targets together with the energy figures they were derived from
pub fn compute_with_breakdown(
    stats: &UserStats,
    reference_year: i32,
) -> Result<(DailyTargets, EnergyBreakdown), TargetError> {
    let energy = energy_breakdown(stats, reference_year)?;
    Ok((targets_from_energy(stats, &energy), energy))
}

fn targets_from_energy(stats: &UserStats, energy: &EnergyBreakdown) -> DailyTargets {
    let protein = round_non_negative(stats.weight * PROTEIN_G_PER_KG);
    let fat = round_non_negative(stats.weight * FAT_G_PER_KG);

    let protein_kcal = f64::from(protein) * KCAL_PER_G_PROTEIN;
    let fat_kcal = f64::from(fat) * KCAL_PER_G_FAT;
    let remaining_kcal = energy.target_calories - protein_kcal - fat_kcal;

    DailyTargets {
        calories: round_non_negative(energy.target_calories),
        carbs: round_non_negative(remaining_kcal / KCAL_PER_G_CARBS),
        protein,
        fat,
        sugar: SUGAR_CAP_G,
        sodium: SODIUM_CAP_MG,
    }
}

/// Round half away from zero, flooring negatives at zero
fn round_non_negative(value: f64) -> u32 {
    value.round().max(0.0) as u32
}
