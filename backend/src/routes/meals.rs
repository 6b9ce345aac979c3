//! Meal logging API routes

use crate::error::ApiError;
use crate::services::meals::{today, MealService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use diet_tracker_shared::{
    CatalogMealRequest, CreateMealRequest, DailyIntakeResponse, DateQuery, DateRange, MealLog,
    MealType,
};
use uuid::Uuid;
use validator::Validate;

/// Create meal routes
pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_meals).post(create_meal))
        .route("/catalog", post(create_catalog_meal))
        .route("/summary", get(daily_summary))
        .route("/export", get(export_meals))
        .route("/:id", delete(delete_meal))
}

/// GET /api/v1/meals?date= - Meals of a day, oldest first
async fn list_meals(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<MealLog>>, ApiError> {
    let date = query.date.unwrap_or_else(today);
    let meals = MealService::list_by_date(state.db(), date).await?;
    Ok(Json(meals))
}

/// POST /api/v1/meals - Log a manual or photo-confirmed meal
async fn create_meal(
    State(state): State<AppState>,
    Json(req): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealLog>), ApiError> {
    req.validate()?;
    let entry = req.to_entry()?;
    let log = MealService::log_manual(state.db(), entry, req.date).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// POST /api/v1/meals/catalog - Log a portion of a catalog item
async fn create_catalog_meal(
    State(state): State<AppState>,
    Json(req): Json<CatalogMealRequest>,
) -> Result<(StatusCode, Json<MealLog>), ApiError> {
    req.validate()?;
    let meal_type: MealType = req.meal_type.parse()?;
    let log = MealService::log_from_catalog(
        state.db(),
        &req.food_id,
        req.serving_size,
        meal_type,
        req.date,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// DELETE /api/v1/meals/:id
async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    MealService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/meals/summary?date= - Totals against targets
async fn daily_summary(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<DailyIntakeResponse>, ApiError> {
    let date = query.date.unwrap_or_else(today);
    let intake = MealService::daily_intake(state.db(), date).await?;
    Ok(Json(intake))
}

/// GET /api/v1/meals/export?start=&end= - Meals in a date range as CSV
async fn export_meals(
    State(state): State<AppState>,
    Query(range): Query<DateRange>,
) -> Result<impl IntoResponse, ApiError> {
    let filename = format!(
        "attachment; filename=\"meals-{}-to-{}.csv\"",
        range.start, range.end
    );
    let csv = MealService::export_csv(state.db(), range).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&filename).map_err(|e| ApiError::Internal(e.into()))?,
    );

    Ok((headers, csv))
}
