//! Food catalog API routes

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use diet_tracker_shared::food_catalog::{self, FoodItem};
use diet_tracker_shared::{FoodSearchQuery, PortionQuery, PortionResponse};

/// Create food catalog routes
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search_foods))
        .route("/:id/portion", get(portion_food))
}

/// GET /api/v1/foods?q=&favorites= - Search the catalog, favorites first
async fn search_foods(Query(query): Query<FoodSearchQuery>) -> Json<Vec<FoodItem>> {
    let favorites = query.favorite_ids();
    let items = food_catalog::search(query.term(), favorites.as_slice())
        .into_iter()
        .copied()
        .collect();
    Json(items)
}

/// GET /api/v1/foods/:id/portion?serving= - Nutrients for a serving size in grams
async fn portion_food(
    Path(id): Path<String>,
    Query(query): Query<PortionQuery>,
) -> Result<Json<PortionResponse>, ApiError> {
    let (food, nutrients) = food_catalog::portion_by_id(&id, query.serving)?;
    Ok(Json(PortionResponse {
        food: *food,
        serving_size: query.serving,
        nutrients,
    }))
}
