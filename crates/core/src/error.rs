use crate::types::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Record not found.")]
    NotFound(RecordId),

    #[error("Invalid record id.")]
    InvalidId(String),

    /// Carries the single, user-facing message of the first failed rule.
    #[error("{0}")]
    Validation(String),
}
