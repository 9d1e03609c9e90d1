//! upwait-core: domain logic for the upwait "update or wait?" service.
//!
//! This crate owns the item model, the SQLite item store, and the query and
//! vote services built on top of it.

pub mod core;
pub mod model;
pub mod store;
