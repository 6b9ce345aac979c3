//! Diet Tracker Backend
//!
//! Personal nutrition tracking: daily targets from body stats, meal logging
//! and photo-based nutrition estimates.
//!
//! Routes handle HTTP, services hold the business rules, repositories talk
//! to PostgreSQL through SQLx.

use anyhow::Result;
use diet_tracker_backend::{
    config::AppConfig, db, routes, services::analysis, state::AppState,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let production = AppConfig::is_production();
    init_tracing(production);

    let config = AppConfig::load()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        production,
        photo_analysis = config.analyzer.enabled,
        "Starting Diet Tracker Backend"
    );
    if production {
        check_production_config(&config)?;
    }

    let db_pool = db::create_pool(&config.database).await?;
    // Production runs migrations as a separate deploy step
    if !production {
        db::run_migrations(&db_pool).await?;
    }

    let analyzer = analysis::from_config(&config.analyzer)?;
    if !config.analyzer.enabled {
        warn!("Photo analysis is disabled; /api/v1/analyze will answer 503");
    }
    let metrics = routes::metrics::install_recorder()?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = routes::create_router(AppState::new(db_pool, config, analyzer).with_metrics(metrics));

    let listener = TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Pretty logs for development, JSON lines in production
fn init_tracing(production: bool) {
    let default_filter = if production {
        "diet_tracker_backend=info,tower_http=info"
    } else {
        "diet_tracker_backend=debug,tower_http=debug,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    if production {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

fn check_production_config(config: &AppConfig) -> Result<()> {
    if ["localhost", "127.0.0.1"]
        .iter()
        .any(|host| config.database.url.contains(host))
    {
        warn!("Database URL points at localhost in production");
    }

    let problems = config.production_errors();
    for problem in &problems {
        error!("Configuration error: {}", problem);
    }
    if !problems.is_empty() {
        anyhow::bail!("Invalid production configuration");
    }
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
