use std::sync::Arc;

use common::errors::AnalysisError;
use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

use super::aggregator::{Aggregator, ConversationAnalytics};
use super::insights::{generate_insights, generate_recommendations};
use super::metrics::calculate_metrics;
use super::record::{AnalysisRecord, ResponseAnalysis};
use crate::context::ServiceContext;
use crate::conversation::{now_iso8601, AgentResponse, ConversationInput};
use crate::signals::analyzer::PATTERNS_LOADED;
use crate::signals::{assess_response_quality, LexicalMessageAnalyzer, MessageAnalyzer};
use crate::state::AnalysisStore;

pub const COMPONENT_NAME: &str = "conversation_analyzer";

/// Result of analyzing one exchange. Failures are reported, never raised.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Completed(Box<AnalysisRecord>),
    Failed { error: String, code: String },
}

impl AnalysisOutcome {
    pub fn record(&self) -> Option<&AnalysisRecord> {
        match self {
            AnalysisOutcome::Completed(record) => Some(record.as_ref()),
            AnalysisOutcome::Failed { .. } => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisOutcome::Completed(_))
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyzerHealth {
    pub component: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns_loaded: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

/// Analyzes conversation exchanges, stores the records and answers
/// aggregate analytics queries over them.
pub struct ConversationAnalyzer {
    message_analyzer: LexicalMessageAnalyzer,
    store: Arc<dyn AnalysisStore>,
    aggregator: Aggregator,
    response_time_seconds: f64,
    default_period: String,
}

impl ConversationAnalyzer {
    pub fn new(context: &ServiceContext, store: Arc<dyn AnalysisStore>) -> Self {
        let config = &context.config;
        info!(
            component = COMPONENT_NAME,
            patterns_loaded = PATTERNS_LOADED,
            "conversation analyzer initialized"
        );
        Self {
            message_analyzer: LexicalMessageAnalyzer::new(),
            store,
            aggregator: Aggregator::new(config.top_insights_limit()),
            response_time_seconds: config.response_time_seconds(),
            default_period: config.default_period(),
        }
    }

    pub fn default_period(&self) -> &str {
        &self.default_period
    }

    /// Analyzes one exchange and stores the record under the conversation id,
    /// replacing any earlier record for that id.
    pub async fn analyze_conversation(
        &self,
        conversation: &ConversationInput,
        response: &AgentResponse,
    ) -> AnalysisOutcome {
        let span = info_span!("analyze_conversation", conversation_id = %conversation.id);
        match self
            .try_analyze_conversation(conversation, response)
            .instrument(span)
            .await
        {
            Ok(record) => AnalysisOutcome::Completed(Box::new(record)),
            Err(err) => {
                warn!(
                    conversation_id = %conversation.id,
                    code = err.code(),
                    error = %err,
                    "conversation analysis failed"
                );
                AnalysisOutcome::Failed {
                    error: err.to_string(),
                    code: err.code().to_string(),
                }
            }
        }
    }

    async fn try_analyze_conversation(
        &self,
        conversation: &ConversationInput,
        response: &AgentResponse,
    ) -> Result<AnalysisRecord, AnalysisError> {
        let now = now_iso8601();

        let message_analysis = self.message_analyzer.analyze_message(&conversation.message);
        let response_quality = assess_response_quality(&response.message);
        let conversation_metrics =
            calculate_metrics(&message_analysis, response, self.response_time_seconds);

        let insights = generate_insights(&response.agent_name, &message_analysis);
        let recommendations = generate_recommendations(&message_analysis, &response_quality);

        debug!(
            sentiment = ?message_analysis.sentiment.label,
            intent = ?message_analysis.intent.label,
            complexity = ?message_analysis.complexity.level,
            quality = response_quality.score,
            "message signals computed"
        );

        let record = AnalysisRecord {
            conversation_id: conversation.id.clone(),
            timestamp: now.clone(),
            agent_used: response.agent_name.clone(),
            response_analysis: ResponseAnalysis::new(response, response_quality, &now),
            message_analysis,
            conversation_metrics,
            insights,
            recommendations,
        };

        self.store.put(record.clone()).await?;

        info!(
            agent = %record.agent_used,
            insights = record.insights.len(),
            recommendations = record.recommendations.len(),
            "conversation analyzed"
        );
        Ok(record)
    }

    /// Aggregates every stored record. The period is echoed, not applied.
    pub async fn get_conversation_analytics(&self, period: Option<&str>) -> ConversationAnalytics {
        let period = period.unwrap_or(&self.default_period);

        match self.store.scan().await {
            Ok(records) => {
                let analytics = self.aggregator.summarize(period, &records);
                info!(
                    period = %period,
                    total_conversations = analytics.total_conversations(),
                    "conversation analytics computed"
                );
                analytics
            }
            Err(err) => {
                let err = AnalysisError::from(err);
                warn!(period = %period, error = %err, "conversation analytics failed");
                ConversationAnalytics::Failed {
                    period: period.to_string(),
                    error: err.to_string(),
                }
            }
        }
    }

    pub async fn get_record(&self, conversation_id: &str) -> Result<AnalysisRecord, AnalysisError> {
        Ok(self.store.get(conversation_id).await?)
    }

    pub async fn health_check(&self) -> AnalyzerHealth {
        match self.store.len().await {
            Ok(cache_size) => AnalyzerHealth {
                component: COMPONENT_NAME.to_string(),
                status: HealthStatus::Healthy,
                cache_size: Some(cache_size),
                patterns_loaded: Some(PATTERNS_LOADED),
                error: None,
                timestamp: now_iso8601(),
            },
            Err(err) => {
                warn!(component = COMPONENT_NAME, error = %err, "health check failed");
                AnalyzerHealth {
                    component: COMPONENT_NAME.to_string(),
                    status: HealthStatus::Unhealthy,
                    cache_size: None,
                    patterns_loaded: None,
                    error: Some(err.to_string()),
                    timestamp: now_iso8601(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::insights::INSIGHT_QUESTION;
    use crate::signals::IntentLabel;
    use crate::state::memory::MemoryAnalysisStore;
    use crate::state::StateStorageError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    fn analyzer() -> ConversationAnalyzer {
        ConversationAnalyzer::new(
            &ServiceContext::default(),
            Arc::new(MemoryAnalysisStore::new()),
        )
    }

    fn reply(agent: &str, message: &str) -> AgentResponse {
        AgentResponse {
            message: message.to_string(),
            agent_name: agent.to_string(),
            success: true,
            timestamp: None,
        }
    }

    struct FailingStore;

    #[async_trait]
    impl AnalysisStore for FailingStore {
        async fn put(&self, _record: AnalysisRecord) -> Result<(), StateStorageError> {
            Err(StateStorageError::StorageError("disk full".to_string()))
        }
        async fn get(&self, id: &str) -> Result<AnalysisRecord, StateStorageError> {
            Err(StateStorageError::NotFound(id.to_string()))
        }
        async fn exists(&self, _id: &str) -> Result<bool, StateStorageError> {
            Ok(false)
        }
        async fn len(&self) -> Result<usize, StateStorageError> {
            Err(StateStorageError::StorageError("unreachable".to_string()))
        }
        async fn scan(&self) -> Result<Vec<AnalysisRecord>, StateStorageError> {
            Err(StateStorageError::StorageError("unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_analyze_conversation_builds_record() {
        let analyzer = analyzer();
        let outcome = analyzer
            .analyze_conversation(
                &ConversationInput::new("conv_1", "Como posso melhorar minhas vendas?"),
                &reply("max", "Aqui estão três dicas práticas para aumentar suas vendas."),
            )
            .await;

        let record = outcome.record().unwrap();
        assert_eq!(record.conversation_id, "conv_1");
        assert_eq!(record.agent_used, "max");
        assert_eq!(record.message_analysis.intent.label, IntentLabel::Question);
        assert_eq!(record.conversation_metrics.response_time_seconds, 2.5);
        assert_eq!(record.response_analysis.response_quality.score, 1.0);
        assert_eq!(
            record.insights,
            vec![
                "Agente max foi selecionado para esta conversa".to_string(),
                INSIGHT_QUESTION.to_string(),
            ]
        );
        assert!(record.recommendations.is_empty());

        let stored = analyzer.get_record("conv_1").await.unwrap();
        assert_eq!(&stored, record);
    }

    #[tokio::test]
    async fn test_reanalysis_replaces_record() {
        let analyzer = analyzer();
        let conversation = ConversationInput::new("conv_1", "Oi");
        analyzer
            .analyze_conversation(&conversation, &reply("leo", "Olá, aqui é o Leo."))
            .await;
        analyzer
            .analyze_conversation(&conversation, &reply("lia", "Olá, aqui é a Lia."))
            .await;

        assert_eq!(analyzer.get_record("conv_1").await.unwrap().agent_used, "lia");
        assert_eq!(
            analyzer.get_conversation_analytics(None).await.total_conversations(),
            1
        );
    }

    #[tokio::test]
    async fn test_missing_record_is_storage_error() {
        let err = analyzer().get_record("missing").await.unwrap_err();
        assert_eq!(err.code(), "StorageError");
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_not_raised() {
        let analyzer = ConversationAnalyzer::new(&ServiceContext::default(), Arc::new(FailingStore));

        let outcome = analyzer
            .analyze_conversation(&ConversationInput::new("c", "Oi"), &reply("leo", "Olá"))
            .await;
        match &outcome {
            AnalysisOutcome::Failed { error, code } => {
                assert!(error.contains("disk full"));
                assert_eq!(code, "StorageError");
            }
            other => panic!("expected failure, got {:?}", other),
        }
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["code"], "StorageError");

        let analytics = analyzer.get_conversation_analytics(Some("30d")).await;
        let json = serde_json::to_value(&analytics).unwrap();
        assert_eq!(json["period"], "30d");
        assert!(json["error"].as_str().unwrap().contains("unreachable"));

        let health = analyzer.health_check().await;
        assert_eq!(health.status, HealthStatus::Unhealthy);
    }

    #[tokio::test]
    async fn test_health_check_reports_cache_size() {
        let analyzer = analyzer();
        analyzer
            .analyze_conversation(&ConversationInput::new("a", "Oi"), &reply("leo", "Olá"))
            .await;

        let health = analyzer.health_check().await;
        assert_eq!(health.component, COMPONENT_NAME);
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.cache_size, Some(1));
        assert_eq!(health.patterns_loaded, Some(PATTERNS_LOADED));

        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn test_default_period_comes_from_config() {
        let analytics = analyzer().get_conversation_analytics(None).await;
        let json = serde_json::to_value(&analytics).unwrap();
        assert_eq!(json["period"], "7d");
        assert_eq!(json["total_conversations"], 0);
    }
}
