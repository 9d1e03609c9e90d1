//! Service layer for upwait-core.
//!
//! Provides typed, high-level APIs for the read-only queries and for casting
//! votes. The service layer encapsulates item store management behind a clean
//! interface.
//!
//! # Usage
//!
//! ```no_run
//! use std::path::Path;
//! use upwait_core::core::CoreContext;
//! use upwait_core::model::VoteDirection;
//!
//! let ctx = CoreContext::new(Path::new("/var/lib/upwait/upwait.db"));
//! let services = ctx.services().unwrap();
//!
//! let item = services.votes().cast("iOS 17", VoteDirection::Up).unwrap();
//! let suggestions = services.queries().suggest("ios").unwrap();
//! ```

pub mod errors;
pub mod queries;
pub mod votes;

pub use errors::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

use crate::store::ItemStore;

/// Default number of entries returned by the trending and most-voted listings.
pub const DEFAULT_LISTING_LIMIT: usize = 5;

/// Context for upwait-core services.
///
/// Holds the location of the item store and the listing bounds.
#[derive(Debug, Clone)]
pub struct CoreContext {
    /// Path to the SQLite database file. `None` means in-memory.
    db_path: Option<PathBuf>,
    listing_limit: usize,
}

impl CoreContext {
    /// Create a context backed by the database at `db_path`.
    #[must_use]
    pub fn new(db_path: &Path) -> Self {
        Self {
            db_path: Some(db_path.to_path_buf()),
            listing_limit: DEFAULT_LISTING_LIMIT,
        }
    }

    /// Create a context backed by a fresh in-memory database.
    ///
    /// Nothing survives the returned services being dropped.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            db_path: None,
            listing_limit: DEFAULT_LISTING_LIMIT,
        }
    }

    /// Override the trending/most-voted listing bound.
    #[must_use]
    pub fn with_listing_limit(mut self, limit: usize) -> Self {
        self.listing_limit = limit;
        self
    }

    /// Path to the database, if file-backed.
    #[must_use]
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    #[must_use]
    pub const fn listing_limit(&self) -> usize {
        self.listing_limit
    }

    /// Open the item store and initialize its schema.
    ///
    /// This is the standard way to get a ready-to-use store.
    pub fn open_store(&self) -> CoreResult<ItemStore> {
        let store = match &self.db_path {
            Some(path) => ItemStore::open(path)?,
            None => ItemStore::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an `UpwaitServices` instance backed by this context.
    pub fn services(&self) -> CoreResult<UpwaitServices> {
        let store = self.open_store()?;
        Ok(UpwaitServices {
            ctx: self.clone(),
            store,
        })
    }
}

/// Facade providing all upwait service APIs.
///
/// Owns an open item store and hands out the query and vote services.
pub struct UpwaitServices {
    ctx: CoreContext,
    store: ItemStore,
}

impl UpwaitServices {
    /// Access read-only query operations.
    #[must_use]
    pub fn queries(&self) -> queries::QueryService<'_> {
        queries::QueryService::new(&self.ctx, &self.store)
    }

    /// Access vote operations.
    #[must_use]
    pub fn votes(&self) -> votes::VoteService<'_> {
        votes::VoteService::new(&self.store)
    }

    /// Get a reference to the underlying item store.
    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Get a reference to the core context.
    #[must_use]
    pub const fn context(&self) -> &CoreContext {
        &self.ctx
    }
}
