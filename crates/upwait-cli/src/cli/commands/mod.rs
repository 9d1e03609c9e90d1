//! Command implementations.

pub mod queries;
pub mod serve;
pub mod vote;

pub use queries::{run_popular, run_search, run_suggest, run_trending};
pub use serve::{run_serve, ServeOverrides};
pub use vote::run_vote;

/// Shown when a lookup or listing fails for any reason.
pub const SEARCH_FAILED: &str = "Error searching. Please try again.";

/// Shown when a vote fails for any reason.
pub const VOTE_FAILED: &str = "Error updating vote. Please try again.";

/// Shown when a name has no votes yet.
pub const NO_DATA: &str = "No data found for this device/software. Be the first to vote!";
