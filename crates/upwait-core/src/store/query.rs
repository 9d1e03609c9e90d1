//! Read-only queries over the item store.
//!
//! Every query tolerates zero matches and returns an empty result rather
//! than an error.

use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::{item_from_row, ItemStore, ITEM_COLUMNS};
use crate::model::{normalize_name, Item};

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl ItemStore {
    /// Find an item by case-insensitive exact name.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Item>> {
        let key = normalize_name(name);
        self.conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE name_key = ?"),
                params![key],
                item_from_row,
            )
            .optional()
            .with_context(|| format!("Failed to look up item '{key}'"))
    }

    /// Items whose name contains `term`, case-insensitively.
    ///
    /// Ranked exact match first, then prefix matches, then other substring
    /// matches. Within a tier: total votes descending, then name ascending.
    /// `term` is matched literally; `%` and `_` have no special meaning.
    pub fn search_containing(&self, term: &str, limit: usize) -> Result<Vec<Item>> {
        let key = normalize_name(term);
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM items
                 WHERE instr(name_key, ?1) > 0
                 ORDER BY
                     CASE
                         WHEN name_key = ?1 THEN 0
                         WHEN substr(name_key, 1, length(?1)) = ?1 THEN 1
                         ELSE 2
                     END,
                     up_votes + down_votes DESC,
                     name_key ASC
                 LIMIT ?2"
            ))
            .context("Failed to prepare suggestion query")?;

        let rows = stmt
            .query_map(params![key, sql_limit(limit)], item_from_row)
            .context("Failed to run suggestion query")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read suggestion rows")
    }

    /// Most recently voted items first.
    pub fn recently_updated(&self, limit: usize) -> Result<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM items
                 ORDER BY last_updated DESC, name_key ASC
                 LIMIT ?"
            ))
            .context("Failed to prepare trending query")?;

        let rows = stmt
            .query_map(params![sql_limit(limit)], item_from_row)
            .context("Failed to run trending query")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read trending rows")
    }

    /// Items with the highest total vote volume first.
    pub fn most_voted(&self, limit: usize) -> Result<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM items
                 ORDER BY up_votes + down_votes DESC, name_key ASC
                 LIMIT ?"
            ))
            .context("Failed to prepare popularity query")?;

        let rows = stmt
            .query_map(params![sql_limit(limit)], item_from_row)
            .context("Failed to run popularity query")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read popularity rows")
    }
}
