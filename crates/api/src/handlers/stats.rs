//! Handler for whole-collection statistics.

use axum::extract::State;
use axum::Json;
use watchlist_core::stats::RecordStats;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/stats
///
/// Aggregates over every stored record, ignoring any list filters.
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<RecordStats>> {
    let records = state.store.list_all().await?;
    Ok(Json(RecordStats::compute(&records)))
}
