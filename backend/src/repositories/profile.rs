//! Profile repository - the single stored set of body stats and targets

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use diet_tracker_shared::{DailyTargets, UserStats};
use sqlx::types::Json;
use sqlx::PgPool;

/// Stored profile
#[derive(Debug, Clone)]
pub struct Profile {
    pub stats: UserStats,
    pub targets: DailyTargets,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    stats: Json<UserStats>,
    targets: Json<DailyTargets>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            stats: row.stats.0,
            targets: row.targets.0,
            updated_at: row.updated_at,
        }
    }
}

/// Profile repository
pub struct ProfileRepository;

impl ProfileRepository {
    /// Insert or replace the profile
    pub async fn upsert(db: &PgPool, stats: &UserStats, targets: &DailyTargets) -> Result<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO user_profile (id, stats, targets, updated_at)
            VALUES (1, $1, $2, NOW())
            ON CONFLICT (id) DO UPDATE SET
                stats = EXCLUDED.stats,
                targets = EXCLUDED.targets,
                updated_at = EXCLUDED.updated_at
            RETURNING stats, targets, updated_at
            "#,
        )
        .bind(Json(stats))
        .bind(Json(targets))
        .fetch_one(db)
        .await
        .context("failed to save profile")?;

        Ok(row.into())
    }

    /// The stored profile, if onboarding has happened
    pub async fn get(db: &PgPool) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT stats, targets, updated_at FROM user_profile WHERE id = 1",
        )
        .fetch_optional(db)
        .await?;

        Ok(row.map(Profile::from))
    }
}
