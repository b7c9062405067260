//! Shared response body types for API handlers.

use serde::Serialize;

/// `{ "ok": true }` acknowledgement for updates and deletes.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl Default for OkResponse {
    fn default() -> Self {
        Self { ok: true }
    }
}
