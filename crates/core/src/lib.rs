//! Domain layer for the watchlist record service.
//!
//! Everything here is pure: record types, payload validation, list query
//! parsing, pagination, statistics and the starter dataset. Storage adapters
//! live in `watchlist-db` and the HTTP surface in `watchlist-api`.

pub mod error;
pub mod presence;
pub mod query;
pub mod record;
pub mod seed;
pub mod stats;
pub mod types;
pub mod validation;
