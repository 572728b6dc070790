//! HTTP client for the pulseboard API.
//!
//! The dashboard process talks to the API exclusively through this client.
//! The two read-only health calls are memoized for a fixed TTL so a page
//! render with several status widgets issues at most one request per window.
//! Every failure collapses to a single shape: transport problems and non-2xx
//! statuses become [`AppError::Network`], undecodable bodies become
//! [`AppError::Parse`]. No retries, no backoff.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::cache::TtlCache;
use crate::error::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct BackendClient {
    base_url: String,
    http: Client,
    health_cache: Mutex<TtlCache<Value>>,
    detailed_health_cache: Mutex<TtlCache<Value>>,
}

impl BackendClient {
    /// `base_url` is the API URL including prefix, e.g.
    /// `http://127.0.0.1:8000/api/v1`.
    pub fn new(base_url: String, cache_ttl: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            health_cache: Mutex::new(TtlCache::new(cache_ttl)),
            detailed_health_cache: Mutex::new(TtlCache::new(cache_ttl)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /health`, memoized for the configured TTL.
    pub async fn get_health(&self) -> Result<Value, AppError> {
        {
            let cache = self.health_cache.lock().await;
            if let Some(cached) = cache.get() {
                return Ok(cached);
            }
        }

        let fresh = self.get("health").await?;
        self.health_cache.lock().await.put(fresh.clone());
        Ok(fresh)
    }

    /// `GET /health/detailed`, memoized for the configured TTL.
    pub async fn get_detailed_health(&self) -> Result<Value, AppError> {
        {
            let cache = self.detailed_health_cache.lock().await;
            if let Some(cached) = cache.get() {
                return Ok(cached);
            }
        }

        let fresh = self.get("health/detailed").await?;
        self.detailed_health_cache.lock().await.put(fresh.clone());
        Ok(fresh)
    }

    pub async fn get(&self, endpoint: &str) -> Result<Value, AppError> {
        self.execute(self.request(Method::GET, endpoint)).await
    }

    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, AppError> {
        self.execute(self.request(Method::POST, endpoint).json(body))
            .await
    }

    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<Value, AppError> {
        self.execute(self.request(Method::PUT, endpoint).json(body))
            .await
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, AppError> {
        self.execute(self.request(Method::DELETE, endpoint)).await
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'));
        self.http.request(method, url).timeout(REQUEST_TIMEOUT)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, AppError> {
        let response = request
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Network(format!("HTTP {}: {}", status, body)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|err| AppError::Parse(err.to_string()))
    }
}
