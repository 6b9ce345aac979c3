//! Meal log repository - database operations for logged meals

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use diet_tracker_shared::{MealEntry, MealLog, NutrientTotals};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::PgPool;
use uuid::Uuid;

/// Meal log row as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealLogRow {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub meal_type: String,
    pub menu_name: String,
    pub calories: Decimal,
    pub carbs: Decimal,
    pub protein: Decimal,
    pub fat: Decimal,
    pub sugar: Decimal,
    pub sodium: Decimal,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl MealLogRow {
    pub fn nutrients(&self) -> NutrientTotals {
        NutrientTotals {
            calories: dec_to_f64(self.calories),
            carbs: dec_to_f64(self.carbs),
            protein: dec_to_f64(self.protein),
            fat: dec_to_f64(self.fat),
            sugar: dec_to_f64(self.sugar),
            sodium: dec_to_f64(self.sodium),
        }
    }
}

impl TryFrom<MealLogRow> for MealLog {
    type Error = anyhow::Error;

    fn try_from(row: MealLogRow) -> Result<Self> {
        let nutrients = row.nutrients();
        Ok(MealLog {
            id: row.id,
            log_date: row.log_date,
            meal_type: row
                .meal_type
                .parse()
                .with_context(|| format!("stored meal {} has meal_type '{}'", row.id, row.meal_type))?,
            menu_name: row.menu_name,
            nutrients,
            source: row
                .source
                .parse()
                .with_context(|| format!("stored meal {} has source '{}'", row.id, row.source))?,
            created_at: row.created_at,
        })
    }
}

/// Per-day nutrient totals
#[derive(Debug, Clone)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub totals: NutrientTotals,
    pub meal_count: i64,
}

pub(crate) fn dec_to_f64(d: Decimal) -> f64 {
    d.to_f64().unwrap_or(0.0)
}

pub(crate) fn f64_to_dec(f: f64) -> Decimal {
    Decimal::try_from(f)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

const MEAL_COLUMNS: &str = "id, log_date, meal_type, menu_name, calories, carbs, protein, fat, sugar, sodium, source, created_at";

/// Meal log repository
pub struct MealLogRepository;

impl MealLogRepository {
    /// Store a validated meal against `date`
    pub async fn create(db: &PgPool, entry: &MealEntry, date: NaiveDate) -> Result<MealLog> {
        let n = &entry.nutrients;
        let row = sqlx::query_as::<_, MealLogRow>(&format!(
            r#"
            INSERT INTO meal_logs (id, log_date, meal_type, menu_name,
                                   calories, carbs, protein, fat, sugar, sodium, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {MEAL_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(date)
        .bind(entry.meal_type.as_str())
        .bind(&entry.menu_name)
        .bind(f64_to_dec(n.calories))
        .bind(f64_to_dec(n.carbs))
        .bind(f64_to_dec(n.protein))
        .bind(f64_to_dec(n.fat))
        .bind(f64_to_dec(n.sugar))
        .bind(f64_to_dec(n.sodium))
        .bind(entry.source.as_str())
        .fetch_one(db)
        .await?;

        row.try_into()
    }

    /// Meals of one day in the order they were logged
    pub async fn get_by_date(db: &PgPool, date: NaiveDate) -> Result<Vec<MealLog>> {
        let rows = sqlx::query_as::<_, MealLogRow>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meal_logs
            WHERE log_date = $1
            ORDER BY created_at ASC, id ASC
            "#
        ))
        .bind(date)
        .fetch_all(db)
        .await?;

        rows.into_iter().map(MealLog::try_from).collect()
    }

    /// Meals between two dates, inclusive
    pub async fn get_by_date_range(
        db: &PgPool,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<MealLog>> {
        let rows = sqlx::query_as::<_, MealLogRow>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meal_logs
            WHERE log_date BETWEEN $1 AND $2
            ORDER BY log_date ASC, created_at ASC, id ASC
            "#
        ))
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await?;

        rows.into_iter().map(MealLog::try_from).collect()
    }

    /// Delete a meal, returning whether it existed
    pub async fn delete(db: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM meal_logs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sum of every nutrient logged on `date`
    pub async fn get_daily_totals(db: &PgPool, date: NaiveDate) -> Result<DailyTotals> {
        let row = sqlx::query_as::<_, (Decimal, Decimal, Decimal, Decimal, Decimal, Decimal, i64)>(
            r#"
            SELECT
                COALESCE(SUM(calories), 0),
                COALESCE(SUM(carbs), 0),
                COALESCE(SUM(protein), 0),
                COALESCE(SUM(fat), 0),
                COALESCE(SUM(sugar), 0),
                COALESCE(SUM(sodium), 0),
                COUNT(*)
            FROM meal_logs
            WHERE log_date = $1
            "#,
        )
        .bind(date)
        .fetch_one(db)
        .await?;

        Ok(DailyTotals {
            date,
            totals: NutrientTotals {
                calories: dec_to_f64(row.0),
                carbs: dec_to_f64(row.1),
                protein: dec_to_f64(row.2),
                fat: dec_to_f64(row.3),
                sugar: dec_to_f64(row.4),
                sodium: dec_to_f64(row.5),
            },
            meal_count: row.6,
        })
    }
}
