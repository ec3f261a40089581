use async_trait::async_trait;
use common::configuration::Configuration;
use common::errors::AnalysisError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::conversation::{AgentResponse, ConversationInput};
use crate::retrieval::{knowledge_base, KnowledgeItem, RetrievalHit};

pub mod memory;
pub mod specialist;
pub mod squad;

pub use memory::{BoundedMemory, MemoryEntry};
pub use specialist::SpecialistAgent;
pub use squad::AgentSquad;

/// The three specialists of the squad
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Leo,
    Max,
    Lia,
}

impl AgentKind {
    pub const ALL: [AgentKind; 3] = [AgentKind::Leo, AgentKind::Max, AgentKind::Lia];

    pub fn name(&self) -> &'static str {
        match self {
            AgentKind::Leo => "leo",
            AgentKind::Max => "max",
            AgentKind::Lia => "lia",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::Leo => "Leo",
            AgentKind::Max => "Max",
            AgentKind::Lia => "Lia",
        }
    }

    /// Area of expertise as presented to users
    pub fn area(&self) -> &'static str {
        match self {
            AgentKind::Leo => "finanças",
            AgentKind::Max => "marketing e vendas",
            AgentKind::Lia => "recursos humanos",
        }
    }

    pub fn knowledge_base(&self) -> Vec<KnowledgeItem> {
        match self {
            AgentKind::Leo => knowledge_base::finance(),
            AgentKind::Max => knowledge_base::marketing(),
            AgentKind::Lia => knowledge_base::human_resources(),
        }
    }

    fn default_specialization(&self) -> &'static str {
        match self {
            AgentKind::Leo => "financial",
            AgentKind::Max => "marketing",
            AgentKind::Lia => "hr",
        }
    }

    fn default_max_processing_time(&self) -> u64 {
        match self {
            AgentKind::Leo => 300,
            AgentKind::Max => 180,
            AgentKind::Lia => 240,
        }
    }

    fn default_memory_retention_days(&self) -> u32 {
        match self {
            AgentKind::Leo => 30,
            AgentKind::Max => 14,
            AgentKind::Lia => 90,
        }
    }
}

/// Per-agent settings with configuration overrides applied
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentSettings {
    pub enabled: bool,
    pub specialization: String,
    /// Seconds; advisory only
    pub max_processing_time: u64,
    pub memory_retention_days: u32,
    pub memory_capacity: usize,
}

impl AgentSettings {
    pub fn resolve(kind: AgentKind, config: &Configuration) -> Self {
        let agent = config.agent(kind.name());
        Self {
            enabled: agent.and_then(|a| a.enabled).unwrap_or(true),
            specialization: agent
                .and_then(|a| a.specialization.clone())
                .unwrap_or_else(|| kind.default_specialization().to_string()),
            max_processing_time: agent
                .and_then(|a| a.max_processing_time)
                .unwrap_or_else(|| kind.default_max_processing_time()),
            memory_retention_days: agent
                .and_then(|a| a.memory_retention_days)
                .unwrap_or_else(|| kind.default_memory_retention_days()),
            memory_capacity: config.memory_capacity(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Healthy,
    Inactive,
    Degraded,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentHealth {
    pub agent: String,
    pub specialization: String,
    pub status: AgentStatus,
    pub last_activity: String,
    pub processed_messages: u64,
    pub error_count: u64,
    pub memory_usage: usize,
    pub knowledge_base_size: usize,
    pub max_processing_time: u64,
    pub memory_retention_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentSummary {
    pub name: String,
    pub specialization: String,
    pub is_active: bool,
    pub last_activity: String,
    pub processed_messages: u64,
    pub error_count: u64,
    pub memory_size: usize,
    pub knowledge_base_size: usize,
    pub max_processing_time: u64,
    pub memory_retention_days: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DataAnalysis {
    pub agent: String,
    pub fields_analyzed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_summary: Option<NumericSummary>,
    pub related_knowledge: Vec<RetrievalHit>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AgentReport {
    pub title: String,
    pub agent: String,
    pub findings: Vec<String>,
    pub knowledge_sources: Vec<String>,
    pub generated_at: String,
}

/// Behaviour shared by every specialist in the squad
#[async_trait]
pub trait Agent: Send + Sync {
    fn kind(&self) -> AgentKind;

    /// Answers one conversation. An inactive agent answers with `success: false`.
    async fn process_message(&self, conversation: &ConversationInput) -> AgentResponse;

    /// Summarizes the fields of a JSON object and looks up related knowledge
    async fn analyze_data(&self, data: &Value) -> Result<DataAnalysis, AnalysisError>;

    async fn generate_report(&self, analysis: &DataAnalysis) -> AgentReport;

    async fn health_check(&self) -> AgentHealth;

    async fn handle_error(&self, error: &AnalysisError, context: Option<&str>);

    async fn update_memory(&self, key: &str, value: Value);

    async fn get_memory(&self, key: &str) -> Option<Value>;

    async fn summary(&self) -> AgentSummary;
}
