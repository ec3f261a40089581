use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{KnowledgeItem, RetrievalHit, Retriever};
use crate::context::ServiceContext;

const WHOLE_QUERY_WEIGHT: f64 = 0.5;
const CONTENT_WORD_WEIGHT: f64 = 0.1;
const KEYWORD_WEIGHT: f64 = 0.2;
const TAG_WEIGHT: f64 = 0.3;

/// Ranks a fixed set of knowledge items against free-text queries.
///
/// Items are immutable after construction and shared between clones.
#[derive(Debug, Clone)]
pub struct KnowledgeRetriever {
    agent: String,
    items: Arc<[KnowledgeItem]>,
    relevance_threshold: f64,
    max_results: usize,
}

impl KnowledgeRetriever {
    pub fn new(
        agent: impl Into<String>,
        items: Vec<KnowledgeItem>,
        relevance_threshold: f64,
        max_results: usize,
    ) -> Self {
        Self {
            agent: agent.into(),
            items: items.into(),
            relevance_threshold,
            max_results,
        }
    }

    pub fn from_context(
        agent: impl Into<String>,
        items: Vec<KnowledgeItem>,
        context: &ServiceContext,
    ) -> Self {
        Self::new(
            agent,
            items,
            context.config.relevance_threshold(),
            context.config.max_retrieval_results(),
        )
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    pub fn items(&self) -> &[KnowledgeItem] {
        &self.items
    }

    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = Vec::new();
        for item in self.items.iter() {
            if !sources.contains(&item.source.as_str()) {
                sources.push(&item.source);
            }
        }
        sources
    }

    /// Relevance of an item for an already lower-cased query, within [0, 1].
    ///
    /// An empty query is contained in every content and scores the whole-query
    /// weight on every item.
    pub fn relevance_score(query_lower: &str, item: &KnowledgeItem) -> f64 {
        let content = item.content.to_lowercase();
        let mut score = 0.0;

        if content.contains(query_lower) {
            score += WHOLE_QUERY_WEIGHT;
        }

        for word in query_lower.split_whitespace() {
            if content.contains(word) {
                score += CONTENT_WORD_WEIGHT;
            }
            if item.keywords.iter().any(|kw| kw.to_lowercase() == word) {
                score += KEYWORD_WEIGHT;
            }
        }

        for tag in &item.tags {
            if query_lower.contains(&tag.to_lowercase()) {
                score += TAG_WEIGHT;
            }
        }

        f64::min(score, 1.0)
    }

    pub fn rank(&self, text: &str) -> Vec<RetrievalHit> {
        let query_lower = text.to_lowercase();

        let mut hits: Vec<RetrievalHit> = self
            .items
            .iter()
            .filter_map(|item| {
                let score = Self::relevance_score(&query_lower, item);
                (score > self.relevance_threshold).then(|| RetrievalHit {
                    content: item.content.clone(),
                    score,
                    source: item.source.clone(),
                    agent: self.agent.clone(),
                })
            })
            .collect();

        // stable: equal scores keep knowledge base order
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(self.max_results);

        debug!(
            agent = %self.agent,
            query = %text,
            hits = hits.len(),
            "knowledge retrieved"
        );
        hits
    }
}

#[async_trait]
impl Retriever for KnowledgeRetriever {
    async fn retrieve(&self, text: &str) -> Vec<RetrievalHit> {
        self.rank(text)
    }
}
