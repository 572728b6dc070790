use clap::Parser;

use crate::config::Config;

/// Pulseboard API server arguments. Flags override the corresponding
/// environment variables.
#[derive(Debug, Parser)]
#[command(
    name = "pulseboard-api",
    version,
    about = "Thin web API backing the pulseboard dashboard"
)]
pub struct Cli {
    /// Interface the API server binds to
    #[arg(long)]
    pub host: Option<String>,

    /// Port the API server listens on
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (sqlite)
    #[arg(long)]
    pub database_url: Option<String>,
}

impl Cli {
    /// Fold the command-line overrides into an env-derived config.
    pub fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.api_host = host;
        }
        if let Some(port) = self.port {
            config.api_port = port;
        }
        if let Some(database_url) = self.database_url {
            config.database_url = database_url;
        }
    }
}
