//! CLI command definitions and handlers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use upwait_core::model::VoteDirection;

pub mod commands;

/// Update or wait? Crowd-sourced verdicts on device and software updates.
#[derive(Parser, Debug)]
#[command(name = "upwait")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Endpoint URL (default: $UPWAIT_API_URL or http://127.0.0.1:8787/api/updates)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Vote ledger file (default: <data dir>/upwait/votes.json)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP endpoint
    Serve {
        /// Address to bind (default: $UPWAIT_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (default: $UPWAIT_PORT or 8787)
        #[arg(long)]
        port: Option<u16>,

        /// SQLite database path, or ":memory:" (default: $UPWAIT_DB or upwait.db)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Entries in the trending and most-voted listings
        #[arg(long)]
        listing_limit: Option<usize>,
    },

    /// Look up the verdict for a device or software version
    Search {
        /// Name, e.g. iOS 17
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Suggest names matching a partial term
    Suggest {
        /// At least two characters
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Show the most recently voted updates
    Trending,

    /// Show the most voted devices
    Popular,

    /// Vote on whether an update is safe
    Vote {
        /// up = safe to update, down = better wait
        #[arg(value_enum)]
        direction: VoteDirection,

        /// Name, e.g. iOS 17
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
}

/// Join multi-word positional arguments back into one name.
#[must_use]
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
