use super::{AnalysisStore, StateStorageError};
use crate::analytics::record::AnalysisRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

#[derive(Default)]
struct Records {
    by_id: HashMap<String, AnalysisRecord>,
    /// Ids in first-insertion order; overwrites keep their slot
    order: Vec<String>,
}

/// In-memory storage backend for analysis records
/// Uses a HashMap wrapped in Arc<RwLock<>> for thread-safe access
#[derive(Clone, Default)]
pub struct MemoryAnalysisStore {
    storage: Arc<RwLock<Records>>,
}

impl MemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryAnalysisStore {
    async fn put(&self, record: AnalysisRecord) -> Result<(), StateStorageError> {
        let conversation_id = record.conversation_id.clone();
        let mut storage = self.storage.write().await;

        debug!(
            conversation_id = %conversation_id,
            agent = %record.agent_used,
            insights = record.insights.len(),
            "storing analysis record"
        );

        if storage.by_id.insert(conversation_id.clone(), record).is_none() {
            storage.order.push(conversation_id);
        }
        Ok(())
    }

    async fn get(&self, conversation_id: &str) -> Result<AnalysisRecord, StateStorageError> {
        let storage = self.storage.read().await;

        match storage.by_id.get(conversation_id) {
            Some(record) => Ok(record.clone()),
            None => {
                warn!(conversation_id = %conversation_id, "analysis record not found");
                Err(StateStorageError::NotFound(conversation_id.to_string()))
            }
        }
    }

    async fn exists(&self, conversation_id: &str) -> Result<bool, StateStorageError> {
        let storage = self.storage.read().await;
        Ok(storage.by_id.contains_key(conversation_id))
    }

    async fn len(&self) -> Result<usize, StateStorageError> {
        let storage = self.storage.read().await;
        Ok(storage.by_id.len())
    }

    async fn scan(&self) -> Result<Vec<AnalysisRecord>, StateStorageError> {
        let storage = self.storage.read().await;
        storage
            .order
            .iter()
            .map(|id| {
                storage.by_id.get(id).cloned().ok_or_else(|| {
                    StateStorageError::StorageError(format!("index out of sync for {}", id))
                })
            })
            .collect()
    }
}
