use async_trait::async_trait;
use common::errors::AnalysisError;
use thiserror::Error;

use crate::analytics::record::AnalysisRecord;

pub mod memory;

/// Error types for analysis storage operations
#[derive(Debug, Error)]
pub enum StateStorageError {
    /// No record stored for the given conversation_id
    #[error("Analysis record not found for conversation_id: {0}")]
    NotFound(String),

    /// Storage backend error
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<StateStorageError> for AnalysisError {
    fn from(err: StateStorageError) -> Self {
        AnalysisError::Storage(err.to_string())
    }
}

/// Trait for analysis record storage backends
///
/// Records are keyed by conversation_id; writing an existing id replaces the
/// record. Scans return records in first-insertion order of their ids.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Store an analysis record, replacing any record with the same id
    async fn put(&self, record: AnalysisRecord) -> Result<(), StateStorageError>;

    /// Retrieve an analysis record by conversation_id
    async fn get(&self, conversation_id: &str) -> Result<AnalysisRecord, StateStorageError>;

    /// Check if a record exists for a conversation_id
    async fn exists(&self, conversation_id: &str) -> Result<bool, StateStorageError>;

    /// Number of stored records
    async fn len(&self) -> Result<usize, StateStorageError>;

    /// Snapshot of every stored record, in first-insertion order
    async fn scan(&self) -> Result<Vec<AnalysisRecord>, StateStorageError>;
}
