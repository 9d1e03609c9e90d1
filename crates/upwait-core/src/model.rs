//! Domain types for upwait items and votes.
//!
//! An [`Item`] is a named device or software version. Its [`Verdict`] is
//! always derived from its vote counts and is never set independently.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::CoreError;

/// Derived recommendation for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// More people report the update as safe than not
    Update,
    /// Ties and down-majorities resolve here
    Wait,
}

impl Verdict {
    /// Compute the verdict for a pair of vote counts.
    ///
    /// `Update` iff `up_votes > down_votes`; ties resolve to `Wait`.
    #[must_use]
    pub const fn from_counts(up_votes: u64, down_votes: u64) -> Self {
        if up_votes > down_votes {
            Self::Update
        } else {
            Self::Wait
        }
    }

    /// The stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Update => "UPDATE",
            Self::Wait => "WAIT",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UPDATE" => Ok(Self::Update),
            "WAIT" => Ok(Self::Wait),
            other => Err(CoreError::InvalidInput {
                reason: format!("unknown verdict '{other}'"),
            }),
        }
    }
}

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    /// Safe to update
    Up,
    /// Better wait
    Down,
}

impl VoteDirection {
    /// `(up, down)` increments contributed by one vote in this direction.
    #[must_use]
    pub const fn increments(self) -> (i64, i64) {
        match self {
            Self::Up => (1, 0),
            Self::Down => (0, 1),
        }
    }
}

impl std::fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Parses exactly `up` or `down`. Anything else, including other casings,
/// is rejected.
impl FromStr for VoteDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(CoreError::InvalidInput {
                reason: format!("vote type must be 'up' or 'down', got '{other}'"),
            }),
        }
    }
}

/// A named device/software version being voted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name, casing preserved from the first vote
    pub name: String,
    pub up_votes: u64,
    pub down_votes: u64,
    pub verdict: Verdict,
    pub last_updated: DateTime<Utc>,
}

impl Item {
    /// Total vote volume.
    #[must_use]
    pub const fn total_votes(&self) -> u64 {
        self.up_votes + self.down_votes
    }
}

/// An entry in the most-voted listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularItem {
    #[serde(flatten)]
    pub item: Item,
    /// Total votes cast on this item
    pub update_count: u64,
}

impl From<Item> for PopularItem {
    fn from(item: Item) -> Self {
        let update_count = item.total_votes();
        Self { item, update_count }
    }
}

/// Normalize a name for case-insensitive matching.
///
/// Trims surrounding whitespace and lowercases. Two names identify the same
/// item iff their normalized forms are equal.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
