//! Route definitions for the record collection.

use axum::routing::get;
use axum::Router;

use crate::handlers::records;
use crate::state::AppState;

/// Record routes, merged under `/api`.
///
/// ```text
/// GET    /records          -> list_records
/// POST   /records          -> create_record
/// GET    /records/{id}     -> get_record
/// PUT    /records/{id}     -> update_record
/// DELETE /records/{id}     -> delete_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/records",
            get(records::list_records).post(records::create_record),
        )
        .route(
            "/records/{id}",
            get(records::get_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
}
