pub mod health;
pub mod records;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /records            list (GET), create (POST)
/// /records/{id}       get (GET), replace (PUT), delete (DELETE)
/// /stats              whole-collection statistics (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(records::router())
        .route("/stats", get(handlers::stats::get_stats))
}
