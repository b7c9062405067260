use std::path::PathBuf;

/// Failures raised by storage adapters.
///
/// None of these are caused by the caller's input; the API layer maps all of
/// them to a sanitized 500.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The data file exists but does not hold a JSON array of records.
    #[error("Data file {0} is corrupt")]
    Corrupt(PathBuf),
}
