//! Photo analysis API route

use crate::error::ApiError;
use crate::services::analysis::AnalysisService;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use diet_tracker_shared::validation::MAX_IMAGE_BYTES;
use diet_tracker_shared::NutritionEstimate;
use tracing::debug;

/// Room for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create photo analysis routes
pub fn analyze_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(analyze_photo))
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + MULTIPART_OVERHEAD_BYTES))
}

/// POST /api/v1/analyze - Estimate nutrition from the `image` multipart field
async fn analyze_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<NutritionEstimate>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await?;
        debug!(mime_type = %mime_type, bytes = bytes.len(), "Received photo");

        let estimate = AnalysisService::analyze(state.analyzer(), &bytes, &mime_type).await?;
        return Ok(Json(estimate));
    }

    Err(ApiError::field("image", "No image provided"))
}
