use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::consts::{
    DEFAULT_ANALYTICS_PERIOD, DEFAULT_MAX_RETRIEVAL_RESULTS, DEFAULT_MEMORY_CAPACITY,
    DEFAULT_RELEVANCE_THRESHOLD, DEFAULT_RESPONSE_TIME_SECONDS, DEFAULT_TOP_INSIGHTS_LIMIT,
};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AgentConfig {
    pub enabled: Option<bool>,
    pub specialization: Option<String>,
    pub max_processing_time: Option<u64>,
    pub memory_retention_days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AgentsConfig {
    pub leo: Option<AgentConfig>,
    pub max: Option<AgentConfig>,
    pub lia: Option<AgentConfig>,
}

impl AgentsConfig {
    pub fn get(&self, agent_name: &str) -> Option<&AgentConfig> {
        match agent_name {
            "leo" => self.leo.as_ref(),
            "max" => self.max.as_ref(),
            "lia" => self.lia.as_ref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AnalyticsConfig {
    /// Response time reported for every conversation; it is never measured
    pub placeholder_response_time_seconds: Option<f64>,
    pub top_insights_limit: Option<usize>,
    pub default_period: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RetrievalConfig {
    pub relevance_threshold: Option<f64>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MemoryConfig {
    pub capacity: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Logging {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Configuration {
    pub version: Option<String>,
    pub agents: Option<AgentsConfig>,
    pub analytics: Option<AnalyticsConfig>,
    pub retrieval: Option<RetrievalConfig>,
    pub memory: Option<MemoryConfig>,
    pub logging: Option<Logging>,
}

impl Configuration {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Configuration = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.relevance_threshold();
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "retrieval.relevance_threshold must be within [0, 1], got {}",
                threshold
            )));
        }
        if self.memory_capacity() == 0 {
            return Err(ConfigError::Invalid(
                "memory.capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn agent(&self, agent_name: &str) -> Option<&AgentConfig> {
        self.agents.as_ref().and_then(|a| a.get(agent_name))
    }

    pub fn response_time_seconds(&self) -> f64 {
        self.analytics
            .as_ref()
            .and_then(|a| a.placeholder_response_time_seconds)
            .unwrap_or(DEFAULT_RESPONSE_TIME_SECONDS)
    }

    pub fn top_insights_limit(&self) -> usize {
        self.analytics
            .as_ref()
            .and_then(|a| a.top_insights_limit)
            .unwrap_or(DEFAULT_TOP_INSIGHTS_LIMIT)
    }

    pub fn default_period(&self) -> String {
        self.analytics
            .as_ref()
            .and_then(|a| a.default_period.clone())
            .unwrap_or_else(|| DEFAULT_ANALYTICS_PERIOD.to_string())
    }

    pub fn relevance_threshold(&self) -> f64 {
        self.retrieval
            .as_ref()
            .and_then(|r| r.relevance_threshold)
            .unwrap_or(DEFAULT_RELEVANCE_THRESHOLD)
    }

    pub fn max_retrieval_results(&self) -> usize {
        self.retrieval
            .as_ref()
            .and_then(|r| r.max_results)
            .unwrap_or(DEFAULT_MAX_RETRIEVAL_RESULTS)
    }

    pub fn memory_capacity(&self) -> usize {
        self.memory
            .as_ref()
            .and_then(|m| m.capacity)
            .unwrap_or(DEFAULT_MEMORY_CAPACITY)
    }

    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|l| l.level.clone())
            .unwrap_or_else(|| "info".to_string())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::{AgentConfig, Configuration};
    use crate::errors::ConfigError;

    const FULL_CONFIG: &str = r#"
version: v0.1.0
agents:
  leo:
    enabled: true
    specialization: financial
    max_processing_time: 300
    memory_retention_days: 30
  max:
    enabled: false
analytics:
  placeholder_response_time_seconds: 1.5
  top_insights_limit: 3
  default_period: 30d
retrieval:
  relevance_threshold: 0.4
  max_results: 2
memory:
  capacity: 10
logging:
  level: debug
"#;

    #[test]
    fn test_deserialize_configuration() {
        let config = Configuration::from_yaml_str(FULL_CONFIG).unwrap();
        assert_eq!(config.version.as_deref(), Some("v0.1.0"));
        assert_eq!(
            config.agent("leo"),
            Some(&AgentConfig {
                enabled: Some(true),
                specialization: Some("financial".to_string()),
                max_processing_time: Some(300),
                memory_retention_days: Some(30),
            })
        );
        assert_eq!(config.agent("max").and_then(|a| a.enabled), Some(false));
        assert!(config.agent("lia").is_none());
        assert!(config.agent("zed").is_none());

        assert_eq!(config.response_time_seconds(), 1.5);
        assert_eq!(config.top_insights_limit(), 3);
        assert_eq!(config.default_period(), "30d");
        assert_eq!(config.relevance_threshold(), 0.4);
        assert_eq!(config.max_retrieval_results(), 2);
        assert_eq!(config.memory_capacity(), 10);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_empty_configuration_uses_defaults() {
        let config = Configuration::from_yaml_str("{}").unwrap();
        assert_eq!(config.response_time_seconds(), 2.5);
        assert_eq!(config.top_insights_limit(), 5);
        assert_eq!(config.default_period(), "7d");
        assert_eq!(config.relevance_threshold(), 0.3);
        assert_eq!(config.max_retrieval_results(), 5);
        assert_eq!(config.memory_capacity(), 1000);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let result = Configuration::from_yaml_str("retrieval:\n  relevance_threshold: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_memory_capacity_rejected() {
        let result = Configuration::from_yaml_str("memory:\n  capacity: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let result = Configuration::from_yaml_str("agents: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = Configuration::load("./does/not/exist.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
