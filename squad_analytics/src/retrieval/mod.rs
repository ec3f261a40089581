use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod knowledge_base;
pub mod retriever;

pub use retriever::KnowledgeRetriever;

/// Static unit of domain knowledge owned by one agent topic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeItem {
    pub key: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
    pub source: String,
}

/// One ranked match for a query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrievalHit {
    pub content: String,
    pub score: f64,
    pub source: String,
    pub agent: String,
}

/// Trait for knowledge retrieval backends
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Ranked hits for the query text, best first
    async fn retrieve(&self, text: &str) -> Vec<RetrievalHit>;
}
