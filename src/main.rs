mod bandwidth;
mod catalog;
mod config;
mod handlers;
mod jobs;
mod models;
mod planner;
mod router;

use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use jobs::PlanPool;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub plan_pool: PlanPool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portmapper=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let cfg = Config::load();
    tracing::info!("Starting PortMapper Server");
    tracing::info!("Switch models: {}", catalog::catalog().len());
    let plan_pool = PlanPool::new(cfg.plan_workers);
    tracing::info!("Plan workers: {}", plan_pool.workers());
    tracing::info!("Uplink speed: {} Gb/s", cfg.uplink_speed_gbps);
    tracing::info!("Listen: {}", cfg.listen_addr);

    // Create app state
    let state = Arc::new(AppState {
        config: cfg.clone(),
        plan_pool,
    });

    // Build router
    let app = router::build(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    tracing::info!("PortMapper listening on {}", cfg.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("PortMapper shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
