//! Vote service: validate and apply a single vote.
//!
//! There is no per-voter dedup here. Clients keep their own record of what
//! they voted on; nothing server-side stops a repeated vote.

use chrono::Utc;

use crate::model::{Item, VoteDirection};
use crate::store::ItemStore;

use super::{CoreError, CoreResult};

/// Service for vote operations.
pub struct VoteService<'a> {
    store: &'a ItemStore,
}

impl<'a> VoteService<'a> {
    pub(crate) const fn new(store: &'a ItemStore) -> Self {
        Self { store }
    }

    /// Cast one vote on `name`, creating the item on its first vote.
    ///
    /// Returns the item as it stands after the vote.
    #[tracing::instrument(skip(self))]
    pub fn cast(&self, name: &str, direction: VoteDirection) -> CoreResult<Item> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::invalid("item name required"));
        }

        let item = self.store.apply_vote(name, direction, Utc::now())?;
        tracing::info!(
            name = %item.name,
            up_votes = item.up_votes,
            down_votes = item.down_votes,
            verdict = %item.verdict,
            "vote recorded"
        );
        Ok(item)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoreContext;
    use crate::model::Verdict;

    #[test]
    fn test_cast_creates_unseen_item() {
        let services = CoreContext::in_memory().services().unwrap();

        let item = services.votes().cast("iOS 18", VoteDirection::Down).unwrap();

        assert_eq!(item.name, "iOS 18");
        assert_eq!((item.up_votes, item.down_votes), (0, 1));
        assert_eq!(item.verdict, Verdict::Wait);
        assert_eq!(services.store().count().unwrap(), 1);
    }

    #[test]
    fn test_cast_increments_and_recomputes() {
        let services = CoreContext::in_memory().services().unwrap();
        let votes = services.votes();

        votes.cast("Windows 11", VoteDirection::Down).unwrap();
        let before = votes.cast("Windows 11", VoteDirection::Up).unwrap();
        assert_eq!(before.verdict, Verdict::Wait);

        let after = votes.cast("windows 11", VoteDirection::Up).unwrap();
        assert_eq!(after.total_votes(), before.total_votes() + 1);
        assert_eq!(after.verdict, Verdict::Update);
        assert!(after.last_updated >= before.last_updated);
    }

    #[test]
    fn test_cast_rejects_blank_name() {
        let services = CoreContext::in_memory().services().unwrap();

        let err = services.votes().cast("  ", VoteDirection::Up).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
        assert_eq!(services.store().count().unwrap(), 0);
    }
}
