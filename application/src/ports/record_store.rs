//! Record store port
//!
//! Persists one [`DebateRecord`] per debate instance, keyed by instance id.

use debate_domain::DebateRecord;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordStoreError {
    #[error("Failed to write record {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize record {id}: {message}")]
    Serialize { id: String, message: String },
}

/// Where finished debate records go
pub trait RecordStore: Send + Sync {
    /// Whether a record for `id` was already written (resume support)
    fn exists(&self, id: &str) -> bool;

    /// Persist a record and return its location
    fn save(&self, id: &str, record: &DebateRecord) -> Result<PathBuf, RecordStoreError>;
}
