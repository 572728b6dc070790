use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::net::TcpListener;

use pulseboard::api::{create_api_router, ApiState};
use pulseboard::cli::Cli;
use pulseboard::config::Config;
use pulseboard::db;
use pulseboard::logging::init_logging;
use pulseboard::metrics::AppMetrics;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("Configuration error: {}", err);
        std::process::exit(1);
    });
    cli.apply(&mut config);

    init_logging(&config.log_level);
    tracing::info!(
        "Starting {} v{} ({})",
        config.app_name,
        config.app_version,
        config.environment
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .unwrap_or_else(|err| {
            tracing::error!("Database setup failed: {}", err);
            std::process::exit(1);
        });

    let metrics = Arc::new(AppMetrics::new().unwrap_or_else(|err| {
        tracing::error!("Metrics registration failed: {}", err);
        std::process::exit(1);
    }));

    let addr = format!("{}:{}", config.api_host, config.api_port);
    let state = ApiState::new(Arc::new(config), Arc::new(pool), metrics);
    let app = create_api_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap_or_else(|err| {
        tracing::error!("Failed to bind {}: {}", addr, err);
        std::process::exit(1);
    });
    tracing::info!("API listening on http://{}", addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {}", err);
        std::process::exit(1);
    }

    tracing::info!("API stopped cleanly");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
