use crate::error::CoreError;

/// Records are addressed by a server-generated UUID (v4).
pub type RecordId = uuid::Uuid;

/// Generate a fresh record identifier.
pub fn new_record_id() -> RecordId {
    uuid::Uuid::new_v4()
}

/// Parse a path segment into a [`RecordId`].
pub fn parse_record_id(raw: &str) -> Result<RecordId, CoreError> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| CoreError::InvalidId(raw.to_string()))
}
