//! Daily target service
//!
//! Wraps the pure calculator with the one impure input it needs (the current
//! year) and with profile persistence.

use crate::error::ApiError;
use crate::repositories::{Profile, ProfileRepository};
use chrono::{Datelike, Utc};
use diet_tracker_shared::{
    compute_with_breakdown, CalculateTargetsResponse, DailyTargets, UserStats, UserStatsInput,
};
use sqlx::PgPool;
use tracing::{debug, info, instrument};

/// Current calendar year in UTC
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Target service for business logic
pub struct TargetService;

impl TargetService {
    /// Compute targets for `input`, using the current year when none is given
    pub fn calculate(
        input: UserStatsInput,
        reference_year: Option<i32>,
    ) -> Result<CalculateTargetsResponse, ApiError> {
        let stats = UserStats::try_from(input)?;
        let reference_year = reference_year.unwrap_or_else(current_year);
        let (targets, breakdown) = compute_with_breakdown(&stats, reference_year)?;

        metrics::counter!("targets_computed_total").increment(1);
        debug!(
            calories = targets.calories,
            tdee = breakdown.tdee,
            goal = %stats.goal,
            "Daily targets computed"
        );

        Ok(CalculateTargetsResponse {
            targets,
            breakdown,
            reference_year,
        })
    }

    /// Compute targets from `input` and store both as the profile
    #[instrument(skip(pool, input))]
    pub async fn save_profile(pool: &PgPool, input: UserStatsInput) -> Result<Profile, ApiError> {
        let stats = UserStats::try_from(input)?;
        let targets: DailyTargets =
            diet_tracker_shared::compute_daily_targets(&stats, current_year())?;

        let profile = ProfileRepository::upsert(pool, &stats, &targets)
            .await
            .map_err(ApiError::Internal)?;

        metrics::counter!("targets_computed_total").increment(1);
        info!(calories = targets.calories, "Profile saved");
        Ok(profile)
    }

    /// The stored profile
    pub async fn get_profile(pool: &PgPool) -> Result<Profile, ApiError> {
        ProfileRepository::get(pool)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("No profile has been saved yet".to_string()))
    }
}
