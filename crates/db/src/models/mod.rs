//! Database row types.
//!
//! Rows are converted into `watchlist_core` domain types at the repository
//! boundary so the core crate stays free of `sqlx`.

pub mod record;
