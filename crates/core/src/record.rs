//! Watchlist record entity and its write payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::presence::Presence;
use crate::types::RecordId;

/// A single watchlist entry as stored and returned over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub title: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub genre: String,
    pub year: i32,
    pub rating: Option<i32>,
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Raw create/update payload.
///
/// Every field is kept as an untyped JSON value behind [`Presence`] so that
/// validation, not deserialization, decides what is acceptable. A wrong JSON
/// type for a field surfaces as that field's validation message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordInput {
    #[serde(default)]
    pub title: Presence<Value>,
    #[serde(default, rename = "type")]
    pub record_type: Presence<Value>,
    #[serde(default)]
    pub genre: Presence<Value>,
    #[serde(default)]
    pub year: Presence<Value>,
    #[serde(default)]
    pub rating: Presence<Value>,
    #[serde(default)]
    pub status: Presence<Value>,
    #[serde(default)]
    pub notes: Presence<Value>,
    #[serde(default)]
    pub image_url: Presence<Value>,
}

/// Validated, trimmed record contents without an identifier.
///
/// Produced only by [`RecordInput::validate`](crate::validation).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    pub title: String,
    pub record_type: String,
    pub genre: String,
    pub year: i32,
    pub rating: Option<i32>,
    pub status: String,
    pub notes: String,
    pub image_url: Option<String>,
}

impl RecordFields {
    /// Attach an identifier, producing a storable record.
    pub fn into_record(self, id: RecordId) -> Record {
        Record {
            id,
            title: self.title,
            record_type: self.record_type,
            genre: self.genre,
            year: self.year,
            rating: self.rating,
            status: self.status,
            notes: self.notes,
            image_url: self.image_url,
        }
    }
}
