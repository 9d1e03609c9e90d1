//! upwait-cli: command-line client for the upwait endpoint, and the
//! launcher for the endpoint itself.

pub mod cli;
pub mod client;
pub mod context;
pub mod ledger;
pub mod logging;
pub mod output;
