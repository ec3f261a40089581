use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

// -----------------------------------------------------------------------------
// Analysis Errors
// -----------------------------------------------------------------------------
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("analysis store error: {0}")]
    Storage(String),

    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    #[error("agent {0} is inactive")]
    AgentInactive(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    pub fn code(&self) -> &'static str {
        match self {
            AnalysisError::Storage(_) => "StorageError",
            AnalysisError::UnknownAgent(_) => "UnknownAgent",
            AnalysisError::AgentInactive(_) => "AgentInactive",
            AnalysisError::InvalidInput(_) => "InvalidInput",
            AnalysisError::Internal(_) => "InternalError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_storage_error_message_and_code() {
        let err = AnalysisError::Storage("lock poisoned".to_string());

        assert_eq!(err.to_string(), "analysis store error: lock poisoned");
        assert_eq!(err.code(), "StorageError");
    }

    #[test]
    fn test_unknown_agent_message() {
        let err = AnalysisError::UnknownAgent("zed".to_string());
        assert_eq!(err.to_string(), "unknown agent: zed");
        assert_eq!(err.code(), "UnknownAgent");
    }
}
