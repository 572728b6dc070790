use std::env;

/// Flat application settings, populated from environment variables once at
/// startup and shared read-only afterwards. Every field has a development
/// default; invalid values (rather than missing ones) are startup errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub app_version: String,
    pub environment: String,

    pub api_host: String,
    pub api_port: u16,
    pub api_prefix: String,

    pub dashboard_host: String,
    pub dashboard_port: u16,

    pub database_url: String,

    pub allowed_origins: Vec<String>,
    pub log_level: String,
    pub metrics_enabled: bool,

    /// Memoization window for the read-only backend client calls, in seconds.
    pub client_cache_ttl_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_prefix = lookup("API_PREFIX").unwrap_or_else(|| "/api/v1".to_string());
        if !api_prefix.starts_with('/') {
            return Err(format!("API_PREFIX must start with '/': {}", api_prefix));
        }

        let allowed_origins = parse_origins(
            &lookup("ALLOWED_ORIGINS")
                .unwrap_or_else(|| "http://localhost:8501,http://127.0.0.1:8501".to_string()),
        );
        if allowed_origins.is_empty() {
            return Err("ALLOWED_ORIGINS must contain at least one origin".to_string());
        }

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "pulseboard".to_string()),
            app_version: lookup("APP_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            api_host: lookup("API_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            api_port: parse_number(lookup("API_PORT"), "API_PORT", 8000)?,
            api_prefix,
            dashboard_host: lookup("DASHBOARD_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            dashboard_port: parse_number(lookup("DASHBOARD_PORT"), "DASHBOARD_PORT", 8501)?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://pulseboard.db?mode=rwc".to_string()),
            allowed_origins,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            metrics_enabled: parse_bool(lookup("METRICS_ENABLED"), "METRICS_ENABLED", true)?,
            client_cache_ttl_seconds: parse_number(
                lookup("CLIENT_CACHE_TTL_SECONDS"),
                "CLIENT_CACHE_TTL_SECONDS",
                30,
            )?,
        })
    }

    pub fn api_url(&self) -> String {
        format!("http://{}:{}", self.api_host, self.api_port)
    }

    pub fn dashboard_url(&self) -> String {
        format!("http://{}:{}", self.dashboard_host, self.dashboard_port)
    }

    /// Base URL the dashboard's backend client talks to (API URL + prefix).
    pub fn backend_base_url(&self) -> String {
        format!("{}{}", self.api_url(), self.api_prefix)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_number<T: std::str::FromStr>(
    raw: Option<String>,
    name: &str,
    default: T,
) -> Result<T, String> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number, got '{}'", name, value)),
    }
}

fn parse_bool(raw: Option<String>, name: &str, default: bool) -> Result<bool, String> {
    match raw.as_deref() {
        None => Ok(default),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(format!("{} must be true or false, got '{}'", name, other)),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
