//! Health-check endpoints for monitoring the service and its dependencies.
//!
//! Routes (mounted under `{API_PREFIX}/health`):
//! - `GET /`         — basic status, always healthy while the process serves
//! - `GET /detailed` — adds a per-service status map (database probe + api)
//! - `GET /ready`    — constant readiness probe
//! - `GET /live`     — constant liveness probe
//!
//! The detailed check issues one trivial query against the configured
//! database and maps the outcome to healthy/unhealthy. No retry, no timeout
//! policy, no circuit breaking — a probe failure becomes a message in the
//! response, and the overall status flips to unhealthy.

use std::collections::BTreeMap;

use async_trait::async_trait;
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;

use super::ApiState;

const STATUS_HEALTHY: &str = "healthy";
const STATUS_UNHEALTHY: &str = "unhealthy";

/// One-shot connectivity probe against the backing database.
///
/// Dyn-compatible so tests can substitute failing probes without a pool.
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
impl DatabaseProbe for SqlitePool {
    async fn ping(&self) -> Result<(), AppError> {
        db::ping(self).await
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub environment: String,
    pub uptime: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub details: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub environment: String,
    pub uptime: Option<String>,
    pub services: BTreeMap<String, ServiceStatus>,
}

fn uptime_string(state: &ApiState) -> Option<String> {
    Some(format!("{}s", state.started_at.elapsed().as_secs()))
}

/// `GET /` — basic health status.
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    state.metrics.health_checks_total.inc();

    Json(HealthResponse {
        status: STATUS_HEALTHY.to_string(),
        timestamp: Utc::now(),
        version: state.config.app_version.clone(),
        environment: state.config.environment.clone(),
        uptime: uptime_string(&state),
    })
}

/// `GET /detailed` — health status including per-service checks.
///
/// The overall status is unhealthy iff at least one service entry is
/// non-healthy. Always returns 200; the body carries the verdict.
pub async fn detailed_health_check(
    State(state): State<ApiState>,
) -> Json<DetailedHealthResponse> {
    state.metrics.health_checks_total.inc();

    let database = match state.db_probe.ping().await {
        Ok(()) => ServiceStatus {
            status: STATUS_HEALTHY.to_string(),
            details: "Database connection successful".to_string(),
        },
        Err(err) => {
            state.metrics.db_probe_failures_total.inc();
            ServiceStatus {
                status: STATUS_UNHEALTHY.to_string(),
                details: format!("Database connection failed: {}", err),
            }
        }
    };

    let mut services = BTreeMap::new();
    services.insert("database".to_string(), database);
    services.insert(
        "api".to_string(),
        ServiceStatus {
            status: STATUS_HEALTHY.to_string(),
            details: "API is responding".to_string(),
        },
    );

    let overall = if services.values().all(|s| s.status == STATUS_HEALTHY) {
        STATUS_HEALTHY
    } else {
        STATUS_UNHEALTHY
    };

    Json(DetailedHealthResponse {
        status: overall.to_string(),
        timestamp: Utc::now(),
        version: state.config.app_version.clone(),
        environment: state.config.environment.clone(),
        uptime: uptime_string(&state),
        services,
    })
}

/// `GET /ready` — readiness probe, constant response.
pub async fn readiness_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ready" }))
}

/// `GET /live` — liveness probe, constant response.
pub async fn liveness_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "alive" }))
}
