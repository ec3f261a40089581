pub const SQUAD_CONFIG_PATH_ENV: &str = "SQUAD_CONFIG_PATH";
pub const DEFAULT_SQUAD_CONFIG_PATH: &str = "./squad_config.yaml";
pub const CONVERSATIONS_PATH_ENV: &str = "CONVERSATIONS_PATH";

pub const UNKNOWN_ID: &str = "unknown";
pub const UNKNOWN_AGENT: &str = "unknown";

pub const DEFAULT_RESPONSE_TIME_SECONDS: f64 = 2.5;
pub const DEFAULT_TOP_INSIGHTS_LIMIT: usize = 5;
pub const DEFAULT_ANALYTICS_PERIOD: &str = "7d";

pub const DEFAULT_RELEVANCE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_MAX_RETRIEVAL_RESULTS: usize = 5;

pub const DEFAULT_MEMORY_CAPACITY: usize = 1000;

/// Error count above which an agent reports itself as degraded
pub const AGENT_DEGRADED_ERROR_COUNT: u64 = 10;
/// Error count above which an agent deactivates itself
pub const AGENT_DEACTIVATION_ERROR_COUNT: u64 = 50;
/// Idle time after which an agent reports itself as degraded
pub const AGENT_IDLE_DEGRADED_SECONDS: i64 = 3600;
