//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe (database reachable)
//! - /health/live - Liveness probe (always OK while the process serves requests)

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    /// Informational; a disabled analyzer does not make the service unready
    pub photo_analysis: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn simple(status: &'static str) -> Self {
        HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            checks: None,
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::simple("healthy"))
}

/// Readiness probe - 503 when the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match db::health_check(state.db()).await {
        Ok(()) => CheckStatus {
            status: "healthy",
            message: None,
        },
        Err(e) => CheckStatus {
            status: "unhealthy",
            message: Some(e.to_string()),
        },
    };
    let photo_analysis = CheckStatus {
        status: if state.config().analyzer.enabled { "enabled" } else { "disabled" },
        message: None,
    };

    let is_ready = database.status == "healthy";
    let response = HealthResponse {
        status: if is_ready { "ready" } else { "not_ready" },
        version: env!("CARGO_PKG_VERSION"),
        checks: Some(HealthChecks {
            database,
            photo_analysis,
        }),
    };

    if is_ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness probe
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::simple("alive"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
        assert!(response.checks.is_none());
    }
}
