use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use tokio::net::TcpListener;

use pulseboard::config::Config;
use pulseboard::dashboard::{create_dashboard_router, DashboardState};
use pulseboard::logging::init_logging;
use pulseboard::services::backend::BackendClient;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("Configuration error: {}", err);
        std::process::exit(1);
    });

    init_logging(&config.log_level);

    let backend = BackendClient::new(
        config.backend_base_url(),
        Duration::from_secs(config.client_cache_ttl_seconds),
    );
    tracing::info!("Dashboard backed by API at {}", backend.base_url());

    let addr = format!("{}:{}", config.dashboard_host, config.dashboard_port);
    let state = DashboardState {
        config: Arc::new(config),
        backend: Arc::new(backend),
    };
    let app = create_dashboard_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap_or_else(|err| {
        tracing::error!("Failed to bind {}: {}", addr, err);
        std::process::exit(1);
    });
    tracing::info!("Dashboard listening on http://{}", addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", err);
        std::process::exit(1);
    }

    tracing::info!("Dashboard stopped cleanly");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
