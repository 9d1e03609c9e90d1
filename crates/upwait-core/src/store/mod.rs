//! SQLite item store.
//!
//! One row per item, keyed by the normalized name. Vote counts and verdict
//! are only ever written by [`ItemStore::apply_vote`], which performs the
//! create-or-increment as a single upsert statement so concurrent votes on
//! the same item cannot be lost.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

mod query;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};

use crate::model::{normalize_name, Item, Verdict, VoteDirection};

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Columns selected for every [`Item`] read, in [`item_from_row`] order.
pub(crate) const ITEM_COLUMNS: &str = "name, up_votes, down_votes, verdict, last_updated";

/// Durable store of voted items.
pub struct ItemStore {
    conn: Connection,
}

impl ItemStore {
    /// Open or create an item store at the given path.
    ///
    /// Creates parent directories if they don't exist. The database is put in
    /// WAL mode so readers don't block the single writer.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create parent directories: {}", parent.display())
                })?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .context("Failed to set busy timeout")?;
        let mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .context("Failed to enable WAL journal mode")?;
        tracing::debug!(path = %path.display(), journal_mode = %mode, "opened item store");

        Ok(Self { conn })
    }

    /// Create an in-memory store (for testing and ephemeral servers).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(Self { conn })
    }

    /// Initialize the database schema.
    ///
    /// Creates the items table and its indexes if they don't exist.
    pub fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(SCHEMA_SQL)
            .context("Failed to initialize schema")?;
        Ok(())
    }

    /// Apply one vote, creating the item if it doesn't exist yet.
    ///
    /// Increments the matching counter by exactly one, recomputes the verdict
    /// from the resulting counts and stamps `last_updated` with `now`, all in
    /// one statement. Returns the post-vote item. The stored display name
    /// keeps the casing of the first vote.
    pub fn apply_vote(
        &self,
        name: &str,
        direction: VoteDirection,
        now: DateTime<Utc>,
    ) -> Result<Item> {
        let display_name = name.trim();
        let key = normalize_name(display_name);
        let (up, down) = direction.increments();

        self.conn
            .query_row(
                &format!(
                    "INSERT INTO items (name_key, name, up_votes, down_votes, verdict, last_updated)
                     VALUES (?1, ?2, ?3, ?4, CASE WHEN ?3 > ?4 THEN 'UPDATE' ELSE 'WAIT' END, ?5)
                     ON CONFLICT (name_key) DO UPDATE SET
                         up_votes = up_votes + excluded.up_votes,
                         down_votes = down_votes + excluded.down_votes,
                         verdict = CASE
                             WHEN up_votes + excluded.up_votes > down_votes + excluded.down_votes
                             THEN 'UPDATE' ELSE 'WAIT' END,
                         last_updated = excluded.last_updated
                     RETURNING {ITEM_COLUMNS}"
                ),
                params![key, display_name, up, down, format_timestamp(now)],
                item_from_row,
            )
            .with_context(|| format!("Failed to apply {direction} vote for '{display_name}'"))
    }

    /// Number of stored items.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))
            .context("Failed to count items")?;
        u64::try_from(count).context("Negative item count")
    }

    /// Get a reference to the underlying connection (for advanced queries).
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }
}

/// Format a timestamp for storage.
///
/// Fixed microsecond precision with a `Z` suffix keeps the text sortable, so
/// `ORDER BY last_updated` is chronological.
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Map a row selected with [`ITEM_COLUMNS`] to an [`Item`].
pub(crate) fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    let up_votes = count_column(row, 1)?;
    let down_votes = count_column(row, 2)?;

    let verdict_text: String = row.get(3)?;
    let verdict: Verdict = verdict_text
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    let ts_text: String = row.get(4)?;
    let last_updated = DateTime::parse_from_rfc3339(&ts_text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);

    Ok(Item {
        name: row.get(0)?,
        up_votes,
        down_votes,
        verdict,
        last_updated,
    })
}

fn count_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    u64::try_from(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

// ============================================================================
// Schema SQL
// ============================================================================

const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS items (
    name_key TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    up_votes INTEGER NOT NULL DEFAULT 0 CHECK (up_votes >= 0),
    down_votes INTEGER NOT NULL DEFAULT 0 CHECK (down_votes >= 0),
    verdict TEXT NOT NULL CHECK (verdict IN ('UPDATE', 'WAIT')),
    last_updated TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_items_last_updated ON items(last_updated);
CREATE INDEX IF NOT EXISTS idx_items_total_votes ON items((up_votes + down_votes));
";

// ============================================================================
// Tests
// ============================================================================
