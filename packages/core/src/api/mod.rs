//! API router assembly.
//!
//! `create_api_router` wires the same tree `main.rs` serves, so the
//! integration tests in `tests/` can drive the full application with
//! `tower::ServiceExt::oneshot` instead of a live server.

pub mod health;
pub mod pagination;
pub mod root;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::metrics::AppMetrics;

/// Shared state for all API routes.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<Config>,
    pub db_probe: Arc<dyn health::DatabaseProbe>,
    pub metrics: Arc<AppMetrics>,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(
        config: Arc<Config>,
        db_probe: Arc<dyn health::DatabaseProbe>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            config,
            db_probe,
            metrics,
            started_at: Instant::now(),
        }
    }
}

/// Build the full API router (routes + CORS + metrics middleware).
pub fn create_api_router(state: ApiState) -> Router {
    let health_routes = Router::new()
        .route("/", get(health::health_check))
        .route("/detailed", get(health::detailed_health_check))
        .route("/ready", get(health::readiness_check))
        .route("/live", get(health::liveness_check));

    let health_prefix = format!("{}/health", state.config.api_prefix);
    let cors = cors_layer(&state.config);
    let metrics_enabled = state.config.metrics_enabled;
    let metrics = state.metrics.clone();

    let mut app = Router::new()
        .route("/", get(root::root))
        .nest(&health_prefix, health_routes)
        .with_state(state.clone());

    if metrics_enabled {
        app = app.route(
            "/metrics",
            get(move || {
                let m = metrics.clone();
                async move {
                    match m.render() {
                        Ok(body) => Response::builder()
                            .status(200)
                            .header(header::CONTENT_TYPE, "text/plain; version=0.0.4")
                            .body(Body::from(body))
                            .expect("metrics response should be valid"),
                        Err(err) => Response::builder()
                            .status(500)
                            .body(Body::from(format!("metrics error: {}", err)))
                            .expect("metrics error response should be valid"),
                    }
                }
            }),
        );
    }

    app.layer(middleware::from_fn_with_state(state, track_requests))
        .layer(cors)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Record request count and latency for every response that passes through.
async fn track_requests(State(state): State<ApiState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    state
        .metrics
        .http_requests_total
        .with_label_values(&[method.as_str(), &path, response.status().as_str()])
        .inc();
    state
        .metrics
        .http_request_duration
        .observe(start.elapsed().as_secs_f64());

    response
}
