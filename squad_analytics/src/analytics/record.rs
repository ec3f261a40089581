use serde::{Deserialize, Serialize};

use super::metrics::ConversationMetrics;
use crate::conversation::AgentResponse;
use crate::signals::{MessageAnalysis, ResponseQuality};

/// Analysis of the agent side of a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseAnalysis {
    pub agent_name: String,
    /// Length of the reply in characters
    pub response_length: usize,
    pub response_quality: ResponseQuality,
    pub success: bool,
    pub timestamp: String,
}

impl ResponseAnalysis {
    pub fn new(response: &AgentResponse, quality: ResponseQuality, now: &str) -> Self {
        Self {
            agent_name: response.agent_name.clone(),
            response_length: response.message.chars().count(),
            response_quality: quality,
            success: response.success,
            timestamp: response
                .timestamp
                .clone()
                .unwrap_or_else(|| now.to_string()),
        }
    }
}

/// Complete, immutable result of analyzing one conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisRecord {
    pub conversation_id: String,
    pub timestamp: String,
    pub agent_used: String,
    pub message_analysis: MessageAnalysis,
    pub response_analysis: ResponseAnalysis,
    pub conversation_metrics: ConversationMetrics,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}
