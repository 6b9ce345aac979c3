//! Meal logging service
//!
//! Provides business logic for meal tracking:
//! - Manual, photo-confirmed and catalog meals
//! - Daily totals compared against the stored targets
//! - CSV export over a date range

use crate::error::ApiError;
use crate::repositories::{MealLogRepository, ProfileRepository};
use chrono::{NaiveDate, Utc};
use diet_tracker_shared::food_catalog;
use diet_tracker_shared::{
    DailyIntakeResponse, DateRange, IntakeSummary, MealEntry, MealLog, MealSource, MealType,
};
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

/// Longest range accepted by the CSV export
const MAX_EXPORT_DAYS: i64 = 366;

/// Column names of [`MealCsvRow`], written even when no meal matches
const CSV_HEADER: [&str; 11] = [
    "date",
    "meal_type",
    "menu_name",
    "calories",
    "carbs",
    "protein",
    "fat",
    "sugar",
    "sodium",
    "source",
    "logged_at",
];

/// One CSV line per logged meal
#[derive(Debug, Serialize)]
struct MealCsvRow {
    date: String,
    meal_type: &'static str,
    menu_name: String,
    calories: f64,
    carbs: f64,
    protein: f64,
    fat: f64,
    sugar: f64,
    sodium: f64,
    source: &'static str,
    logged_at: String,
}

impl From<&MealLog> for MealCsvRow {
    fn from(log: &MealLog) -> Self {
        MealCsvRow {
            date: log.log_date.format("%Y-%m-%d").to_string(),
            meal_type: log.meal_type.as_str(),
            menu_name: log.menu_name.clone(),
            calories: log.nutrients.calories,
            carbs: log.nutrients.carbs,
            protein: log.nutrients.protein,
            fat: log.nutrients.fat,
            sugar: log.nutrients.sugar,
            sodium: log.nutrients.sodium,
            source: log.source.as_str(),
            logged_at: log.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Today in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Meal service for business logic
pub struct MealService;

impl MealService {
    /// Store a validated manual or photo-confirmed meal
    #[instrument(skip(pool, entry), fields(meal_type = %entry.meal_type, source = %entry.source))]
    pub async fn log_manual(
        pool: &PgPool,
        entry: MealEntry,
        date: Option<NaiveDate>,
    ) -> Result<MealLog, ApiError> {
        Self::store(pool, entry, date).await
    }

    /// Portion a catalog item and store it as a meal
    #[instrument(skip(pool))]
    pub async fn log_from_catalog(
        pool: &PgPool,
        food_id: &str,
        serving_size: f64,
        meal_type: MealType,
        date: Option<NaiveDate>,
    ) -> Result<MealLog, ApiError> {
        let (item, nutrients) = food_catalog::portion_by_id(food_id, serving_size)?;
        let entry = MealEntry::new(meal_type, item.name, nutrients, MealSource::Catalog)?;
        Self::store(pool, entry, date).await
    }

    async fn store(pool: &PgPool, entry: MealEntry, date: Option<NaiveDate>) -> Result<MealLog, ApiError> {
        let date = date.unwrap_or_else(today);
        let log = MealLogRepository::create(pool, &entry, date)
            .await
            .map_err(ApiError::Internal)?;

        metrics::counter!("meals_logged_total", "source" => entry.source.as_str()).increment(1);
        info!(meal_id = %log.id, date = %date, calories = log.nutrients.calories, "Meal logged");
        Ok(log)
    }

    /// Meals of one day in logging order
    pub async fn list_by_date(pool: &PgPool, date: NaiveDate) -> Result<Vec<MealLog>, ApiError> {
        MealLogRepository::get_by_date(pool, date)
            .await
            .map_err(ApiError::Internal)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let deleted = MealLogRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound(format!("Meal {id} not found")));
        }
        info!(meal_id = %id, "Meal deleted");
        Ok(())
    }

    /// Totals for `date`, compared against the stored targets when there are any
    pub async fn daily_intake(pool: &PgPool, date: NaiveDate) -> Result<DailyIntakeResponse, ApiError> {
        let totals = MealLogRepository::get_daily_totals(pool, date)
            .await
            .map_err(ApiError::Internal)?;
        let profile = ProfileRepository::get(pool)
            .await
            .map_err(ApiError::Internal)?;

        Ok(build_intake(date, totals.meal_count, totals.totals, profile.map(|p| p.targets)))
    }

    /// Meals between `start` and `end` (inclusive) as CSV
    pub async fn export_csv(pool: &PgPool, range: DateRange) -> Result<String, ApiError> {
        range.validate_order()?;
        if (range.end - range.start).num_days() >= MAX_EXPORT_DAYS {
            return Err(ApiError::field(
                "end",
                format!("Export range is limited to {MAX_EXPORT_DAYS} days"),
            ));
        }

        let logs = MealLogRepository::get_by_date_range(pool, range.start, range.end)
            .await
            .map_err(ApiError::Internal)?;

        to_csv(&logs)
    }
}

fn build_intake(
    date: NaiveDate,
    meals_logged: i64,
    consumed: diet_tracker_shared::NutrientTotals,
    targets: Option<diet_tracker_shared::DailyTargets>,
) -> DailyIntakeResponse {
    let summary = targets.map(|t| IntakeSummary::compare(&t, &consumed));
    DailyIntakeResponse {
        date,
        meals_logged,
        consumed,
        progress: summary.as_ref().map(IntakeSummary::progress),
        over_target: summary
            .as_ref()
            .map(|s| s.over_caps().into_iter().map(str::to_string).collect())
            .unwrap_or_default(),
        summary,
    }
}

/// Convert meal logs to a CSV document with a header row
fn to_csv(logs: &[MealLog]) -> Result<String, ApiError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    wtr.write_record(CSV_HEADER)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV header error: {}", e)))?;
    for log in logs {
        wtr.serialize(MealCsvRow::from(log))
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV serialization error: {}", e)))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV flush error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV encoding error: {}", e)))
}
