use std::sync::Arc;

use common::configuration::Configuration;

/// Shared, read-only settings handed to every component at construction.
#[derive(Debug, Clone, Default)]
pub struct ServiceContext {
    pub config: Arc<Configuration>,
}

impl ServiceContext {
    pub fn new(config: Configuration) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}
