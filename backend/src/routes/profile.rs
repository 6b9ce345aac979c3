//! Profile API routes
//!
//! The profile is the onboarding result: body stats plus the targets derived
//! from them. Saving recomputes the targets.

use crate::error::ApiError;
use crate::repositories::Profile;
use crate::services::targets::TargetService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use diet_tracker_shared::{ProfileResponse, UserStatsInput};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).put(save_profile))
}

fn to_response(profile: Profile) -> ProfileResponse {
    ProfileResponse {
        stats: profile.stats,
        targets: profile.targets,
        updated_at: profile.updated_at,
    }
}

/// GET /api/v1/profile - Stored stats and targets
async fn get_profile(State(state): State<AppState>) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = TargetService::get_profile(state.db()).await?;
    Ok(Json(to_response(profile)))
}

/// PUT /api/v1/profile - Save stats and recompute targets
async fn save_profile(
    State(state): State<AppState>,
    Json(stats): Json<UserStatsInput>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = TargetService::save_profile(state.db(), stats).await?;
    Ok(Json(to_response(profile)))
}
