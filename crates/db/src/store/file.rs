//! Record store backed by a single JSON array file.
//!
//! Reads for queries are lenient: an unreadable, missing or corrupt file is
//! logged and treated as an empty collection. Mutations are strict, so a
//! transient read failure can never be written back over stored data.
//! Seeding happens only for a missing file, or one that is not a JSON array;
//! a valid array, even `[]`, is never replaced.
//!
//! Entries are decoded one by one. Numeric fields stored as strings or
//! floats are coerced to whole numbers; an entry that still does not decode
//! is kept verbatim and written back untouched, but not served.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use watchlist_core::record::Record;
use watchlist_core::types::RecordId;

use super::RecordStore;
use crate::error::StoreError;

/// What was found on disk.
#[derive(Debug)]
enum Snapshot {
    Missing,
    Corrupt,
    Loaded(Contents),
}

/// A parsed data file.
#[derive(Debug, Default)]
struct Contents {
    records: Vec<Record>,
    /// Entries that could not be decoded as records.
    unreadable: Vec<Value>,
}

impl Contents {
    fn from_entries(entries: Vec<Value>, path: &Path) -> Self {
        let mut contents = Contents::default();
        for entry in entries {
            match decode_entry(entry) {
                Ok(record) => contents.records.push(record),
                Err((entry, e)) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping undecodable record entry");
                    contents.unreadable.push(entry);
                }
            }
        }
        contents
    }

    fn to_entries(&self) -> Result<Vec<Value>, serde_json::Error> {
        let mut entries = self
            .records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        entries.extend(self.unreadable.iter().cloned());
        Ok(entries)
    }
}

/// Decode one stored entry, coercing `year` and `rating` to whole numbers.
/// On failure the original entry is handed back.
fn decode_entry(entry: Value) -> Result<Record, (Value, serde_json::Error)> {
    let mut coerced = entry.clone();
    if let Value::Object(fields) = &mut coerced {
        for key in ["year", "rating"] {
            if let Some(value) = fields.get_mut(key) {
                coerce_whole_number(value);
            }
        }
    }
    serde_json::from_value(coerced).map_err(|e| (entry, e))
}

/// Floats truncate toward zero; strings holding an integer parse; a blank
/// string becomes `null`. Anything else is left for the decoder to reject.
fn coerce_whole_number(value: &mut Value) {
    let replacement = match value {
        Value::Number(n) if n.as_i64().is_none() => n
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| Value::from(f.trunc() as i64)),
        Value::String(s) if s.trim().is_empty() => Some(Value::Null),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    };
    if let Some(replacement) = replacement {
        *value = replacement;
    }
}

#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Snapshot, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot::Missing),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_slice::<Vec<Value>>(&bytes) {
            Ok(entries) => Ok(Snapshot::Loaded(Contents::from_entries(entries, &self.path))),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Data file is not a JSON array");
                Ok(Snapshot::Corrupt)
            }
        }
    }

    /// Records for read-only operations; failures degrade to empty.
    async fn read_lenient(&self) -> Vec<Record> {
        match self.load().await {
            Ok(Snapshot::Loaded(contents)) => contents.records,
            Ok(Snapshot::Missing) | Ok(Snapshot::Corrupt) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read data file, treating collection as empty");
                Vec::new()
            }
        }
    }

    /// Contents for a mutation. A missing file is an empty collection; a
    /// corrupt or unreadable one aborts the mutation.
    async fn read_strict(&self) -> Result<Contents, StoreError> {
        match self.load().await? {
            Snapshot::Loaded(contents) => Ok(contents),
            Snapshot::Missing => Ok(Contents::default()),
            Snapshot::Corrupt => Err(StoreError::Corrupt(self.path.clone())),
        }
    }

    /// Write via a sibling temp file and rename, so readers never see a
    /// partial file.
    async fn write(&self, contents: &Contents) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let body = serde_json::to_vec_pretty(&contents.to_entries()?)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_err)?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        Ok(self.read_lenient().await)
    }

    async fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        Ok(self.read_lenient().await.into_iter().find(|r| r.id == id))
    }

    async fn insert(&self, record: &Record) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut contents = self.read_strict().await?;
        // Newest first, matching the file's historical layout.
        contents.records.insert(0, record.clone());
        self.write(&contents).await
    }

    async fn update(&self, record: &Record) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut contents = self.read_strict().await?;
        let Some(existing) = contents.records.iter_mut().find(|r| r.id == record.id) else {
            return Ok(false);
        };
        *existing = record.clone();
        self.write(&contents).await?;
        Ok(true)
    }

    async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut contents = self.read_strict().await?;
        let before = contents.records.len();
        contents.records.retain(|r| r.id != id);
        if contents.records.len() == before {
            return Ok(false);
        }
        self.write(&contents).await?;
        Ok(true)
    }

    async fn seed_if_uninitialized(&self, seed: Vec<Record>) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock().await;
        match self.load().await? {
            Snapshot::Loaded(_) => Ok(0),
            snapshot @ (Snapshot::Missing | Snapshot::Corrupt) => {
                tracing::info!(path = %self.path.display(), ?snapshot, "Seeding data file");
                let count = seed.len();
                self.write(&Contents {
                    records: seed,
                    unreadable: Vec::new(),
                })
                .await?;
                Ok(count)
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self.load().await? {
            Snapshot::Corrupt => Err(StoreError::Corrupt(self.path.clone())),
            Snapshot::Missing | Snapshot::Loaded(_) => Ok(()),
        }
    }
}
