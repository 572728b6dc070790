//! Dashboard front-end.
//!
//! A second, independent server process: renders the HTML pages and exposes
//! the JSON data endpoints they read. Talks to the API only through the
//! memoized [`BackendClient`]; there is no shared state with the API process.

pub mod mock;
pub mod pages;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::api::pagination::{Paginated, PaginationParams};
use crate::config::Config;
use crate::error::AppError;
use crate::services::backend::BackendClient;

/// Shared state for the dashboard routes.
#[derive(Clone)]
pub struct DashboardState {
    pub config: Arc<Config>,
    pub backend: Arc<BackendClient>,
}

/// Build the dashboard router (pages + data endpoints).
pub fn create_dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(pages::index_page))
        .route("/dashboard", get(pages::dashboard_page))
        .route("/data/kpis", get(kpi_data))
        .route("/data/timeseries", get(timeseries_data))
        .route("/api-status", get(api_status))
        .with_state(state)
}

/// `GET /data/kpis` — the four KPI cards as JSON.
async fn kpi_data() -> Json<Vec<mock::KpiCard>> {
    Json(mock::kpi_cards())
}

/// `GET /data/timeseries?page=&size=` — paginated 30-day hourly series.
async fn timeseries_data(
    Query(params): Query<PaginationParams>,
) -> Json<Paginated<mock::MetricPoint>> {
    let params = params.normalized();
    let series = mock::timeseries(30);
    let total = series.len() as u64;

    let items: Vec<mock::MetricPoint> = series
        .into_iter()
        .skip(params.offset() as usize)
        .take(params.size as usize)
        .collect();

    Json(Paginated::new(items, total, &params))
}

/// `GET /api-status` — the API health payload, via the memoized client.
async fn api_status(State(state): State<DashboardState>) -> Result<Json<Value>, AppError> {
    state.backend.get_health().await.map(Json)
}
