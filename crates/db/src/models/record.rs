//! Row mapping for the `records` table.

use sqlx::FromRow;
use watchlist_core::record::Record;
use watchlist_core::types::RecordId;

/// A row from the `records` table (timestamps are not selected).
#[derive(Debug, Clone, FromRow)]
pub struct RecordRow {
    pub id: RecordId,
    pub title: String,
    pub record_type: String,
    pub genre: String,
    pub year: i32,
    pub rating: Option<i32>,
    pub status: String,
    pub notes: String,
    pub image_url: Option<String>,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Record {
            id: row.id,
            title: row.title,
            record_type: row.record_type,
            genre: row.genre,
            year: row.year,
            rating: row.rating,
            status: row.status,
            notes: row.notes,
            image_url: row.image_url,
        }
    }
}
