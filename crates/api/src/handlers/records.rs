//! Handlers for the record collection.
//!
//! Request bodies are read as raw bytes and decoded here, so a missing or
//! wrong `Content-Type` header does not reject an otherwise valid JSON body.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use watchlist_core::error::CoreError;
use watchlist_core::query::RecordPage;
use watchlist_core::record::{Record, RecordInput};
use watchlist_core::types::{new_record_id, parse_record_id};

use crate::error::{AppError, AppResult};
use crate::query::RecordListParams;
use crate::response::OkResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/records
///
/// Filtered, sorted, paginated listing. Out-of-range paging input is
/// clamped, never rejected.
pub async fn list_records(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Json<RecordPage>> {
    let Query(pairs) = pairs.map_err(|e| {
        tracing::debug!(error = %e, "Rejected list query string");
        AppError::BadRequest(MSG_BAD_QUERY.to_string())
    })?;
    let query = RecordListParams::from_pairs(pairs).to_list_query();

    let page = state.store.query(&query).await?;

    tracing::debug!(
        page = page.page,
        total = page.total,
        sort = ?query.sort,
        dir = ?query.dir,
        "Records listed",
    );

    Ok(Json(page))
}

/// GET /api/records/{id}
pub async fn get_record(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Record>> {
    let id = parse_record_id(&raw_id)?;

    let record = state
        .store
        .get(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound(id)))?;

    Ok(Json(record))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/records
///
/// Validate, assign a fresh id and persist. Returns 201 with the record.
pub async fn create_record(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let fields = parse_body(&body)?.validate(&state.config.validation)?;
    let record = fields.into_record(new_record_id());

    state.store.insert(&record).await?;

    tracing::info!(record_id = %record.id, title = %record.title, "Record created");

    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/records/{id}
///
/// Full replacement of every mutable field; the id never changes.
pub async fn update_record(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> AppResult<Json<OkResponse>> {
    let id = parse_record_id(&raw_id)?;
    let fields = parse_body(&body)?.validate(&state.config.validation)?;

    let updated = state.store.update(&fields.into_record(id)).await?;
    if !updated {
        return Err(AppError::Core(CoreError::NotFound(id)));
    }

    tracing::info!(record_id = %id, "Record updated");

    Ok(Json(OkResponse::default()))
}

/// DELETE /api/records/{id}
///
/// Hard delete. An emptied collection stays empty.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<OkResponse>> {
    let id = parse_record_id(&raw_id)?;

    let deleted = state.store.delete(id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound(id)));
    }

    tracing::info!(record_id = %id, "Record deleted");

    Ok(Json(OkResponse::default()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const MSG_BODY_NOT_OBJECT: &str = "Request body must be a JSON object.";
const MSG_BAD_QUERY: &str = "Query string could not be parsed.";

/// Decode a record payload from raw bytes. Anything that is not a JSON
/// object fails with a single 400 message.
fn parse_body(body: &[u8]) -> AppResult<RecordInput> {
    serde_json::from_slice::<RecordInput>(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected record payload");
        AppError::BadRequest(MSG_BODY_NOT_OBJECT.to_string())
    })
}
