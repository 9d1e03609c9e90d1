//! Local record of items this profile has voted on.
//!
//! Purely a convenience to avoid double-voting by accident. The server does
//! not know about it and accepts repeated votes from anyone.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use upwait_core::model::normalize_name;

/// File name inside the upwait data directory.
const LEDGER_FILE: &str = "votes.json";

/// JSON-file-backed map of normalized item name to "has voted".
#[derive(Debug)]
pub struct VoteLedger {
    path: PathBuf,
    votes: BTreeMap<String, bool>,
}

impl VoteLedger {
    /// Default ledger location, `<data dir>/upwait/votes.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("upwait").join(LEDGER_FILE))
    }

    /// Load the ledger at `path`.
    ///
    /// A missing file is an empty ledger. An unreadable or corrupt file is
    /// logged and also treated as empty, so a damaged ledger never blocks
    /// searching or voting.
    pub fn load(path: &Path) -> Self {
        let votes = match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("Ignoring corrupt vote ledger {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("Failed to read vote ledger {}: {e}", path.display());
                BTreeMap::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            votes,
        }
    }

    /// Whether this profile already voted on `name` (case-insensitive).
    #[must_use]
    pub fn has_voted(&self, name: &str) -> bool {
        self.votes
            .get(&normalize_name(name))
            .copied()
            .unwrap_or(false)
    }

    /// Record a vote on `name` and persist the ledger.
    pub fn record(&mut self, name: &str) -> Result<()> {
        self.votes.insert(normalize_name(name), true);
        self.save()
    }

    /// Number of items voted on.
    #[must_use]
    pub fn len(&self) -> usize {
        self.votes.values().filter(|voted| **voted).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write to a sibling temp file, then rename over the ledger.
    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create ledger directory: {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.votes).context("Failed to encode ledger")?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("Failed to write ledger: {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace ledger: {}", self.path.display()))?;
        Ok(())
    }
}
