//! Implementation of `upwait serve`.

use std::path::PathBuf;

use anyhow::Result;
use upwait_server::{config::ServerConfig, start_server};

/// Command-line values that take precedence over the environment.
#[derive(Debug, Default)]
pub struct ServeOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub db: Option<PathBuf>,
    pub listing_limit: Option<usize>,
}

impl ServeOverrides {
    /// Apply the overrides on top of an environment-loaded config.
    #[must_use]
    pub fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(db) = self.db {
            config.db_path = db;
        }
        if let Some(limit) = self.listing_limit {
            config.listing_limit = limit;
        }
        config
    }
}

#[tracing::instrument]
pub async fn run_serve(overrides: ServeOverrides) -> Result<()> {
    let config = overrides.apply(ServerConfig::load()?);
    start_server(config).await
}
