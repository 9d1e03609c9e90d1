//! Per-invocation client context.
//!
//! Everything a client command needs is built once in `main` and passed in
//! explicitly: the endpoint client, the vote ledger, and the output formatter.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::client::{UpwaitClient, DEFAULT_API_URL};
use crate::ledger::VoteLedger;
use crate::output::Formatter;

/// Environment variable naming the endpoint URL.
pub const API_URL_ENV: &str = "UPWAIT_API_URL";

/// Resolve the endpoint URL: flag, then environment, then default.
#[must_use]
pub fn resolve_api_url(flag: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> String {
    flag.map(str::to_string)
        .or_else(|| lookup(API_URL_ENV))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Resolve the ledger path: flag, then the platform data directory, then
/// the working directory.
#[must_use]
pub fn resolve_ledger_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(VoteLedger::default_path)
        .unwrap_or_else(|| PathBuf::from(".upwait").join("votes.json"))
}

pub struct ClientContext {
    pub client: UpwaitClient,
    pub ledger: VoteLedger,
    pub formatter: Formatter,
}

impl ClientContext {
    /// Build a context from CLI flags and the process environment.
    pub fn from_flags(
        api_url: Option<&str>,
        ledger: Option<PathBuf>,
        formatter: Formatter,
    ) -> Result<Self> {
        let api_url = resolve_api_url(api_url, |key| env::var(key).ok());
        let ledger_path = resolve_ledger_path(ledger);
        debug!(%api_url, ledger = %ledger_path.display(), "client context");

        Ok(Self {
            client: UpwaitClient::new(&api_url).context("Failed to build HTTP client")?,
            ledger: VoteLedger::load(&ledger_path),
            formatter,
        })
    }
}
