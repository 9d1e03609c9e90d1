//! Implementation of `upwait vote`.

use anyhow::{anyhow, Result};
use tracing::warn;
use upwait_core::model::VoteDirection;

use super::VOTE_FAILED;
use crate::context::ClientContext;

/// Cast a vote unless this profile already voted on the name.
///
/// The ledger entry is written only after the endpoint accepts the vote.
#[tracing::instrument(skip(ctx))]
pub async fn run_vote(ctx: &mut ClientContext, name: &str, direction: VoteDirection) -> Result<()> {
    if ctx.ledger.has_voted(name) {
        return ctx
            .formatter
            .print_message(&format!("You already voted on {name} from this profile."));
    }

    let item = ctx.client.vote(name, direction).await.map_err(|e| {
        warn!("vote request failed: {e}");
        anyhow!(VOTE_FAILED)
    })?;

    if let Err(e) = ctx.ledger.record(&item.name) {
        // The vote itself went through
        warn!("Failed to record vote in ledger: {e:#}");
    }

    ctx.formatter.print(&item)
}
