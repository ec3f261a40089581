use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::consts::{
    AGENT_DEACTIVATION_ERROR_COUNT, AGENT_DEGRADED_ERROR_COUNT, AGENT_IDLE_DEGRADED_SECONDS,
};
use common::errors::AnalysisError;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::memory::BoundedMemory;
use super::{
    Agent, AgentHealth, AgentKind, AgentReport, AgentSettings, AgentStatus, AgentSummary,
    DataAnalysis, NumericSummary,
};
use crate::context::ServiceContext;
use crate::conversation::{now_iso8601, AgentResponse, ConversationInput};
use crate::retrieval::{KnowledgeRetriever, RetrievalHit};

const LAST_MESSAGE_PREFIX: &str = "last_message";

#[derive(Debug)]
struct AgentState {
    is_active: bool,
    last_activity: DateTime<Utc>,
    processed_messages: u64,
    error_count: u64,
}

impl AgentState {
    fn new() -> Self {
        Self {
            is_active: true,
            last_activity: Utc::now(),
            processed_messages: 0,
            error_count: 0,
        }
    }
}

/// Knowledge-grounded specialist. Replies are composed from the agent's own
/// knowledge base; no language model is involved.
pub struct SpecialistAgent {
    kind: AgentKind,
    settings: AgentSettings,
    retriever: KnowledgeRetriever,
    memory: Mutex<BoundedMemory>,
    state: Mutex<AgentState>,
}

impl SpecialistAgent {
    pub fn new(kind: AgentKind, context: &ServiceContext) -> Self {
        let settings = AgentSettings::resolve(kind, &context.config);
        let retriever = KnowledgeRetriever::from_context(kind.name(), kind.knowledge_base(), context);

        info!(
            agent = kind.name(),
            specialization = %settings.specialization,
            knowledge_items = retriever.items().len(),
            memory_capacity = settings.memory_capacity,
            "agent initialized"
        );

        Self {
            kind,
            memory: Mutex::new(BoundedMemory::new(kind.name(), settings.memory_capacity)),
            settings,
            retriever,
            state: Mutex::new(AgentState::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    pub fn retriever(&self) -> &KnowledgeRetriever {
        &self.retriever
    }

    pub async fn is_active(&self) -> bool {
        self.state.lock().await.is_active
    }

    async fn record_activity(&self, activity: &str) {
        let mut state = self.state.lock().await;
        state.last_activity = Utc::now();
        state.processed_messages += 1;
        info!(
            agent = self.name(),
            activity = activity,
            processed_messages = state.processed_messages,
            "agent activity"
        );
    }

    fn compose_reply(&self, hits: &[RetrievalHit]) -> String {
        let greeting = format!(
            "Olá! Aqui é {} {}, especialista em {}.",
            if self.kind == AgentKind::Lia { "a" } else { "o" },
            self.kind.display_name(),
            self.kind.area()
        );

        match hits.split_first() {
            Some((best, rest)) => {
                let mut reply = format!("{} {}", greeting, best.content);
                if let Some(next) = rest.first() {
                    reply.push_str(&format!(" Vale saber também: {}", next.content));
                }
                reply
            }
            None => format!(
                "{} Pode me dar mais detalhes sobre sua dúvida para que eu possa ajudar?",
                greeting
            ),
        }
    }

    pub(crate) async fn health_check_at(&self, now: DateTime<Utc>) -> AgentHealth {
        let state = self.state.lock().await;
        let memory_usage = self.memory.lock().await.len();

        let mut health = AgentHealth {
            agent: self.name().to_string(),
            specialization: self.settings.specialization.clone(),
            status: if state.is_active {
                AgentStatus::Healthy
            } else {
                AgentStatus::Inactive
            },
            last_activity: state.last_activity.to_rfc3339(),
            processed_messages: state.processed_messages,
            error_count: state.error_count,
            memory_usage,
            knowledge_base_size: self.retriever.items().len(),
            max_processing_time: self.settings.max_processing_time,
            memory_retention_days: self.settings.memory_retention_days,
            warning: None,
        };

        if state.error_count > AGENT_DEGRADED_ERROR_COUNT {
            health.status = AgentStatus::Degraded;
            health.warning = Some("High error count".to_string());
        }

        // idle check runs last and wins the warning
        if (now - state.last_activity).num_seconds() > AGENT_IDLE_DEGRADED_SECONDS {
            health.status = AgentStatus::Degraded;
            health.warning = Some("Inactive for too long".to_string());
        }

        health
    }
}

fn summarize_numbers(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let total: f64 = values.iter().sum();
    Some(NumericSummary {
        count: values.len(),
        total,
        mean: total / values.len() as f64,
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    })
}

#[async_trait]
impl Agent for SpecialistAgent {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    async fn process_message(&self, conversation: &ConversationInput) -> AgentResponse {
        if !self.is_active().await {
            warn!(agent = self.name(), conversation_id = %conversation.id, "agent inactive");
            return AgentResponse {
                message: format!(
                    "{} está temporariamente indisponível.",
                    self.kind.display_name()
                ),
                agent_name: self.name().to_string(),
                success: false,
                timestamp: Some(now_iso8601()),
            };
        }

        let hits = self.retriever.rank(&conversation.message);
        let reply = self.compose_reply(&hits);

        let session = [&conversation.session_id, &conversation.user_id, &conversation.id]
            .into_iter()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_default();
        self.update_memory(
            &format!("{}:{}", LAST_MESSAGE_PREFIX, session),
            json!(conversation.message),
        )
        .await;

        self.record_activity("process_message").await;
        debug!(
            agent = self.name(),
            conversation_id = %conversation.id,
            knowledge_hits = hits.len(),
            "reply composed"
        );

        AgentResponse {
            message: reply,
            agent_name: self.name().to_string(),
            success: true,
            timestamp: Some(now_iso8601()),
        }
    }

    async fn analyze_data(&self, data: &Value) -> Result<DataAnalysis, AnalysisError> {
        let Some(fields) = data.as_object() else {
            let err = AnalysisError::InvalidInput("data must be a JSON object".to_string());
            self.handle_error(&err, Some("analyze_data")).await;
            return Err(err);
        };

        let numbers: Vec<f64> = fields.values().filter_map(Value::as_f64).collect();
        let query = fields.keys().cloned().collect::<Vec<_>>().join(" ");
        let related_knowledge = self.retriever.rank(&query);

        self.record_activity("analyze_data").await;

        Ok(DataAnalysis {
            agent: self.name().to_string(),
            fields_analyzed: fields.len(),
            numeric_summary: summarize_numbers(&numbers),
            related_knowledge,
            timestamp: now_iso8601(),
        })
    }

    async fn generate_report(&self, analysis: &DataAnalysis) -> AgentReport {
        let mut findings = vec![format!("{} campos analisados", analysis.fields_analyzed)];

        if let Some(summary) = &analysis.numeric_summary {
            findings.push(format!(
                "{} valores numéricos: total {:.2}, média {:.2}, mínimo {:.2}, máximo {:.2}",
                summary.count, summary.total, summary.mean, summary.min, summary.max
            ));
        }
        findings.extend(analysis.related_knowledge.iter().map(|hit| hit.content.clone()));

        let mut knowledge_sources: Vec<String> = Vec::new();
        for hit in &analysis.related_knowledge {
            if !knowledge_sources.contains(&hit.source) {
                knowledge_sources.push(hit.source.clone());
            }
        }

        self.record_activity("generate_report").await;

        AgentReport {
            title: format!(
                "Relatório de {} - {}",
                self.kind.area(),
                self.kind.display_name()
            ),
            agent: self.name().to_string(),
            findings,
            knowledge_sources,
            generated_at: now_iso8601(),
        }
    }

    async fn health_check(&self) -> AgentHealth {
        self.health_check_at(Utc::now()).await
    }

    async fn handle_error(&self, err: &AnalysisError, context: Option<&str>) {
        let mut state = self.state.lock().await;
        state.error_count += 1;

        error!(
            agent = self.name(),
            code = err.code(),
            context = context.unwrap_or(""),
            error_count = state.error_count,
            error = %err,
            "agent error"
        );

        if state.error_count > AGENT_DEACTIVATION_ERROR_COUNT && state.is_active {
            state.is_active = false;
            error!(agent = self.name(), "agent deactivated after too many errors");
        }
    }

    async fn update_memory(&self, key: &str, value: Value) {
        let mut memory = self.memory.lock().await;
        if let Some(evicted) = memory.insert(key, value) {
            debug!(agent = self.name(), evicted = %evicted.key, "memory entry evicted");
        }
        debug!(agent = self.name(), key = %key, "memory updated");
    }

    async fn get_memory(&self, key: &str) -> Option<Value> {
        self.memory.lock().await.get(key).cloned()
    }

    async fn summary(&self) -> AgentSummary {
        let state = self.state.lock().await;
        AgentSummary {
            name: self.name().to_string(),
            specialization: self.settings.specialization.clone(),
            is_active: state.is_active,
            last_activity: state.last_activity.to_rfc3339(),
            processed_messages: state.processed_messages,
            error_count: state.error_count,
            memory_size: self.memory.lock().await.len(),
            knowledge_base_size: self.retriever.items().len(),
            max_processing_time: self.settings.max_processing_time,
            memory_retention_days: self.settings.memory_retention_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::assess_response_quality;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn agent(kind: AgentKind) -> SpecialistAgent {
        SpecialistAgent::new(kind, &ServiceContext::default())
    }

    fn conversation(message: &str, session_id: &str) -> ConversationInput {
        ConversationInput {
            id: "conv_1".to_string(),
            message: message.to_string(),
            user_id: "user_1".to_string(),
            session_id: session_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_process_message_grounds_reply_in_knowledge() {
        let leo = agent(AgentKind::Leo);
        let response = leo
            .process_message(&conversation("Como organizar meu fluxo de caixa?", "s1"))
            .await;

        assert!(response.success);
        assert_eq!(response.agent_name, "leo");
        assert!(response.message.contains("Fluxo de caixa é o controle"));
        assert!(response.message.contains("Aqui"));
        assert_eq!(assess_response_quality(&response.message).score, 1.0);

        assert_eq!(
            leo.get_memory("last_message:s1").await,
            Some(json!("Como organizar meu fluxo de caixa?"))
        );
        assert_eq!(leo.summary().await.processed_messages, 1);
    }

    #[tokio::test]
    async fn test_summary_and_health_report_resolved_settings() {
        let leo = agent(AgentKind::Leo);
        let summary = leo.summary().await;
        assert_eq!(summary.max_processing_time, 300);
        assert_eq!(summary.memory_retention_days, 30);

        let lia = agent(AgentKind::Lia);
        let health = lia.health_check().await;
        assert_eq!(
            (health.max_processing_time, health.memory_retention_days),
            (240, 90)
        );
    }

    #[tokio::test]
    async fn test_process_message_without_knowledge_asks_for_details() {
        let lia = agent(AgentKind::Lia);
        let response = lia.process_message(&conversation("xyzzy", "")).await;

        assert!(response.success);
        assert!(response.message.starts_with("Olá! Aqui é a Lia"));
        assert!(response.message.contains("mais detalhes"));
        // falls back to the user id when there is no session
        assert_eq!(lia.get_memory("last_message:user_1").await, Some(json!("xyzzy")));
    }

    #[tokio::test]
    async fn test_analyze_data_and_report() {
        let max = agent(AgentKind::Max);
        let data = json!({"vendas": 120.0, "conversão": 0.5, "canal": "whatsapp"});

        let analysis = max.analyze_data(&data).await.unwrap();
        assert_eq!(analysis.fields_analyzed, 3);
        let summary = analysis.numeric_summary.clone().unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, 120.5);
        assert_eq!(summary.min, 0.5);
        assert_eq!(summary.max, 120.0);
        assert!(!analysis.related_knowledge.is_empty());

        let report = max.generate_report(&analysis).await;
        assert_eq!(report.agent, "max");
        assert_eq!(report.findings[0], "3 campos analisados");
        assert!(report.findings[1].starts_with("2 valores numéricos"));
        assert!(!report.knowledge_sources.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_data_rejects_non_objects() {
        let leo = agent(AgentKind::Leo);
        let err = leo.analyze_data(&json!([1, 2, 3])).await.unwrap_err();
        assert_eq!(err.code(), "InvalidInput");
        assert_eq!(leo.summary().await.error_count, 1);
    }

    #[tokio::test]
    async fn test_health_degrades_and_deactivates_with_errors() {
        let leo = agent(AgentKind::Leo);
        let err = AnalysisError::Internal("boom".to_string());

        assert_eq!(leo.health_check().await.status, AgentStatus::Healthy);

        for _ in 0..11 {
            leo.handle_error(&err, None).await;
        }
        let health = leo.health_check().await;
        assert_eq!(health.status, AgentStatus::Degraded);
        assert_eq!(health.warning.as_deref(), Some("High error count"));

        for _ in 0..40 {
            leo.handle_error(&err, Some("test")).await;
        }
        assert!(!leo.is_active().await);
        assert_eq!(leo.summary().await.error_count, 51);

        let response = leo.process_message(&conversation("Olá", "s")).await;
        assert!(!response.success);
    }

    #[tokio::test]
    async fn test_inactive_agent_without_many_errors_reports_inactive() {
        let leo = agent(AgentKind::Leo);
        leo.state.lock().await.is_active = false;
        assert_eq!(leo.health_check().await.status, AgentStatus::Inactive);
    }

    #[tokio::test]
    async fn test_health_degrades_when_idle() {
        let lia = agent(AgentKind::Lia);
        let later = Utc::now() + Duration::seconds(AGENT_IDLE_DEGRADED_SECONDS + 60);
        let health = lia.health_check_at(later).await;
        assert_eq!(health.status, AgentStatus::Degraded);
        assert_eq!(health.warning.as_deref(), Some("Inactive for too long"));
    }

    #[tokio::test]
    async fn test_health_serializes_without_warning() {
        let max = agent(AgentKind::Max);
        let json = serde_json::to_value(max.health_check().await).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["knowledge_base_size"], 5);
        assert!(json.get("warning").is_none());
    }
}
