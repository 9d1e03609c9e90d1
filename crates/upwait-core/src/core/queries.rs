//! Query service: exact lookup, suggestions, trending and most-voted listings.

use crate::model::{Item, PopularItem};
use crate::store::ItemStore;

use super::{CoreContext, CoreError, CoreResult};

/// Maximum number of suggestions returned for one term.
pub const SUGGESTION_LIMIT: usize = 5;

/// Terms shorter than this (in characters, after trimming) get no suggestions.
pub const MIN_SUGGEST_CHARS: usize = 2;

/// Service for read-only item queries.
pub struct QueryService<'a> {
    ctx: &'a CoreContext,
    store: &'a ItemStore,
}

impl<'a> QueryService<'a> {
    pub(crate) const fn new(ctx: &'a CoreContext, store: &'a ItemStore) -> Self {
        Self { ctx, store }
    }

    /// Look up an item by case-insensitive exact name.
    ///
    /// Returns `Err(CoreError::InvalidInput)` for a blank name and
    /// `Err(CoreError::NotFound)` if no item matches.
    #[tracing::instrument(skip(self))]
    pub fn lookup_exact(&self, name: &str) -> CoreResult<Item> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid("search term required"));
        }

        self.store
            .find_by_name(name)?
            .ok_or_else(|| CoreError::NotFound {
                name: name.to_string(),
            })
    }

    /// Up to [`SUGGESTION_LIMIT`] items whose name contains `term`.
    ///
    /// Exact matches rank first, then prefix matches, then other substring
    /// matches; within each tier by total votes descending, then by name.
    /// Terms shorter than [`MIN_SUGGEST_CHARS`] yield an empty list.
    #[tracing::instrument(skip(self))]
    pub fn suggest(&self, term: &str) -> CoreResult<Vec<Item>> {
        let term = term.trim();
        if term.chars().count() < MIN_SUGGEST_CHARS {
            return Ok(Vec::new());
        }

        Ok(self.store.search_containing(term, SUGGESTION_LIMIT)?)
    }

    /// Most recently voted items, newest first.
    pub fn trending(&self) -> CoreResult<Vec<Item>> {
        Ok(self.store.recently_updated(self.ctx.listing_limit())?)
    }

    /// Items with the most votes in total, highest first.
    pub fn popular_devices(&self) -> CoreResult<Vec<PopularItem>> {
        let items = self.store.most_voted(self.ctx.listing_limit())?;
        Ok(items.into_iter().map(PopularItem::from).collect())
    }
}
