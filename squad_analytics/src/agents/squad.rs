use std::sync::Arc;

use common::errors::AnalysisError;
use tracing::info;

use super::{Agent, AgentHealth, AgentKind, AgentSettings, SpecialistAgent};
use crate::context::ServiceContext;

/// Registry of the enabled specialists, in leo, max, lia order
pub struct AgentSquad {
    agents: Vec<Arc<dyn Agent>>,
}

impl AgentSquad {
    pub fn new(context: &ServiceContext) -> Self {
        let agents: Vec<Arc<dyn Agent>> = AgentKind::ALL
            .into_iter()
            .filter(|kind| AgentSettings::resolve(*kind, &context.config).enabled)
            .map(|kind| Arc::new(SpecialistAgent::new(kind, context)) as Arc<dyn Agent>)
            .collect();

        info!(
            agents = ?agents.iter().map(|a| a.kind().name()).collect::<Vec<_>>(),
            "agent squad ready"
        );
        Self { agents }
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Agent>, AnalysisError> {
        let kind =
            AgentKind::from_name(name).ok_or_else(|| AnalysisError::UnknownAgent(name.to_string()))?;
        self.agents
            .iter()
            .find(|agent| agent.kind() == kind)
            .cloned()
            .ok_or_else(|| AnalysisError::AgentInactive(kind.name().to_string()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.agents.iter().map(|agent| agent.kind().name()).collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub async fn health_check(&self) -> Vec<AgentHealth> {
        let mut reports = Vec::with_capacity(self.agents.len());
        for agent in &self.agents {
            reports.push(agent.health_check().await);
        }
        reports
    }
}
