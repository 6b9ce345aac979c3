//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::AppConfig;
use crate::services::analysis::NutritionAnalyzer;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// Every field is cheap to clone: `PgPool` is internally reference counted
/// and the rest sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Photo analysis backend
    pub analyzer: Arc<dyn NutritionAnalyzer>,
    /// Prometheus recorder handle, absent when no recorder was installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, config: AppConfig, analyzer: Arc<dyn NutritionAnalyzer>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            analyzer,
            metrics: None,
        }
    }

    /// Attach the handle used to render `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn analyzer(&self) -> &dyn NutritionAnalyzer {
        self.analyzer.as_ref()
    }
}
