use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::conversation::now_iso8601;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryEntry {
    pub key: String,
    pub value: Value,
    pub timestamp: String,
    pub agent: String,
}

/// Fixed-capacity key/value memory owned by one agent.
///
/// Entries are ordered by last write. Inserting a new key at capacity evicts
/// exactly the entry written longest ago; reads never change the order.
#[derive(Debug)]
pub struct BoundedMemory {
    agent: String,
    entries: LruCache<String, MemoryEntry>,
}

impl BoundedMemory {
    /// A zero capacity is raised to one
    pub fn new(agent: impl Into<String>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            agent: agent.into(),
            entries: LruCache::new(capacity),
        }
    }

    /// Writes `value` under `key`. Returns the entry evicted to make room, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<MemoryEntry> {
        let key = key.into();
        let entry = MemoryEntry {
            key: key.clone(),
            value,
            timestamp: now_iso8601(),
            agent: self.agent.clone(),
        };

        // push hands back either the replaced entry for this key or the evicted one
        match self.entries.push(key.clone(), entry) {
            Some((old_key, evicted)) if old_key != key => Some(evicted),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.peek(key).map(|entry| &entry.value)
    }

    pub fn entry(&self, key: &str) -> Option<&MemoryEntry> {
        self.entries.peek(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    /// Key of the entry that the next new insert at capacity would evict
    pub fn oldest_key(&self) -> Option<&str> {
        self.entries.peek_lru().map(|(key, _)| key.as_str())
    }
}
