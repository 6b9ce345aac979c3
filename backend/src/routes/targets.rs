//! Daily target API routes

use crate::error::ApiError;
use crate::services::targets::TargetService;
use crate::state::AppState;
use axum::{routing::post, Json, Router};
use diet_tracker_shared::{CalculateTargetsRequest, CalculateTargetsResponse};

/// Create target routes
pub fn target_routes() -> Router<AppState> {
    Router::new().route("/calculate", post(calculate_targets))
}

/// POST /api/v1/targets/calculate - Compute targets without storing them
async fn calculate_targets(
    Json(req): Json<CalculateTargetsRequest>,
) -> Result<Json<CalculateTargetsResponse>, ApiError> {
    let response = TargetService::calculate(req.stats, req.reference_year)?;
    Ok(Json(response))
}
