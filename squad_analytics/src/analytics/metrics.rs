use serde::{Deserialize, Serialize};

use crate::conversation::AgentResponse;
use crate::signals::{ComplexityLevel, MessageAnalysis};

/// Satisfaction scale applied to the sentiment score
const SATISFACTION_SCALE: f64 = 5.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMetrics {
    /// Configured placeholder, not a measurement
    pub response_time_seconds: f64,
    pub success_rate: f64,
    /// Sentiment score mapped onto 0-5; zero when the sentiment score is zero
    pub user_satisfaction: f64,
    pub message_complexity: ComplexityLevel,
    pub intent_confidence: f64,
}

pub fn calculate_metrics(
    message_analysis: &MessageAnalysis,
    response: &AgentResponse,
    response_time_seconds: f64,
) -> ConversationMetrics {
    ConversationMetrics {
        response_time_seconds,
        success_rate: if response.success { 1.0 } else { 0.0 },
        user_satisfaction: message_analysis.sentiment.score * SATISFACTION_SCALE,
        message_complexity: message_analysis.complexity.level,
        intent_confidence: message_analysis.intent.confidence,
    }
}
