use common::consts::{UNKNOWN_AGENT, UNKNOWN_ID};
use serde::{Deserialize, Serialize};

fn unknown_id() -> String {
    UNKNOWN_ID.to_string()
}

fn unknown_agent() -> String {
    UNKNOWN_AGENT.to_string()
}

/// Inbound user message. Missing keys fall back to defaults instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationInput {
    #[serde(default = "unknown_id")]
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub session_id: String,
}

impl Default for ConversationInput {
    fn default() -> Self {
        Self::new(UNKNOWN_ID, "")
    }
}

impl ConversationInput {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            user_id: String::new(),
            session_id: String::new(),
        }
    }
}

/// Reply produced by an agent for a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default = "unknown_agent")]
    pub agent_name: String,
    #[serde(default)]
    pub success: bool,
    /// ISO-8601; the analysis time is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Current time as an ISO-8601 string with a fixed UTC offset, so that
/// lexicographic and chronological order agree.
pub fn now_iso8601() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_conversation_defaults() {
        let input: ConversationInput = serde_json::from_str(r#"{"message": "Oi"}"#).unwrap();
        assert_eq!(
            input,
            ConversationInput {
                id: "unknown".to_string(),
                message: "Oi".to_string(),
                user_id: String::new(),
                session_id: String::new(),
            }
        );
    }

    #[test]
    fn test_response_defaults() {
        let response: AgentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.message, "");
        assert_eq!(response.agent_name, "unknown");
        assert!(!response.success);
        assert!(response.timestamp.is_none());
    }

    #[test]
    fn test_now_iso8601_orders_lexicographically() {
        let first = now_iso8601();
        let second = now_iso8601();
        assert!(first <= second);
        assert!(first.ends_with('Z'));
    }
}
