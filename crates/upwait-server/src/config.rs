use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use anyhow::{anyhow, Result};
use tracing::{info, warn};
use upwait_core::core::{CoreContext, DEFAULT_LISTING_LIMIT};

/// Database path value that selects an in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub listing_limit: usize,
}

impl ServerConfig {
    /// Load from `UPWAIT_*` environment variables, falling back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: try_load(&lookup, "UPWAIT_HOST", "0.0.0.0")?,
            port: try_load(&lookup, "UPWAIT_PORT", "8787")?,
            db_path: try_load(&lookup, "UPWAIT_DB", "upwait.db")?,
            listing_limit: try_load(
                &lookup,
                "UPWAIT_LISTING_LIMIT",
                &DEFAULT_LISTING_LIMIT.to_string(),
            )?,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn core_context(&self) -> CoreContext {
        let ctx = if self.db_path.as_os_str() == IN_MEMORY_DB {
            CoreContext::in_memory()
        } else {
            CoreContext::new(&self.db_path)
        };
        ctx.with_listing_limit(self.listing_limit)
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Invalid {key} value '{raw}': {e}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::load_from(lookup(&[])).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8787);
        assert_eq!(config.db_path, PathBuf::from("upwait.db"));
        assert_eq!(config.listing_limit, DEFAULT_LISTING_LIMIT);
        assert_eq!(config.address(), "0.0.0.0:8787");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::load_from(lookup(&[
            ("UPWAIT_HOST", "127.0.0.1"),
            ("UPWAIT_PORT", "9000"),
            ("UPWAIT_DB", "/tmp/votes.db"),
            ("UPWAIT_LISTING_LIMIT", "10"),
        ]))
        .unwrap();
        assert_eq!(config.address(), "127.0.0.1:9000");
        assert_eq!(config.db_path, PathBuf::from("/tmp/votes.db"));
        assert_eq!(config.listing_limit, 10);
        assert_eq!(config.core_context().listing_limit(), 10);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = ServerConfig::load_from(lookup(&[("UPWAIT_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("UPWAIT_PORT"));
    }

    #[test]
    fn test_memory_db_selects_in_memory_context() {
        let config = ServerConfig::load_from(lookup(&[("UPWAIT_DB", IN_MEMORY_DB)])).unwrap();
        assert!(config.core_context().db_path().is_none());
    }
}
