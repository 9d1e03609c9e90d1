//! Implementation of `upwait search`, `suggest`, `trending` and `popular`.

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::warn;
use upwait_core::model::Item;

use super::{NO_DATA, SEARCH_FAILED};
use crate::client::ClientError;
use crate::context::ClientContext;

/// A lookup result annotated with this profile's ledger state.
#[derive(Debug, Serialize)]
pub struct SearchView {
    #[serde(flatten)]
    pub item: Item,
    pub already_voted: bool,
}

fn search_failed(err: &ClientError) -> anyhow::Error {
    warn!("search request failed: {err}");
    anyhow!(SEARCH_FAILED)
}

/// Look up one name and print its verdict.
#[tracing::instrument(skip(ctx))]
pub async fn run_search(ctx: &ClientContext, name: &str) -> Result<()> {
    match ctx.client.search(name).await {
        Ok(Some(item)) => {
            let already_voted = ctx.ledger.has_voted(&item.name);
            ctx.formatter.print(&SearchView {
                item,
                already_voted,
            })
        }
        Ok(None) => ctx.formatter.print_message(NO_DATA),
        Err(e) => Err(search_failed(&e)),
    }
}

#[tracing::instrument(skip(ctx))]
pub async fn run_suggest(ctx: &ClientContext, term: &str) -> Result<()> {
    let suggestions = ctx
        .client
        .suggest(term)
        .await
        .map_err(|e| search_failed(&e))?;
    ctx.formatter
        .print_list(&suggestions, "No suggestions.", "suggestions")
}

pub async fn run_trending(ctx: &ClientContext) -> Result<()> {
    let trending = ctx.client.trending().await.map_err(|e| search_failed(&e))?;
    ctx.formatter
        .print_list(&trending, "No votes yet.", "trending")
}

pub async fn run_popular(ctx: &ClientContext) -> Result<()> {
    let popular = ctx.client.popular().await.map_err(|e| search_failed(&e))?;
    ctx.formatter.print_list(&popular, "No votes yet.", "popular")
}
