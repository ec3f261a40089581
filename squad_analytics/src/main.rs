use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::{env, fs, io};

use common::configuration::Configuration;
use common::consts::{CONVERSATIONS_PATH_ENV, DEFAULT_SQUAD_CONFIG_PATH, SQUAD_CONFIG_PATH_ENV};
use serde::Deserialize;
use squad_analytics::agents::{AgentKind, AgentSquad};
use squad_analytics::analytics::ConversationAnalyzer;
use squad_analytics::context::ServiceContext;
use squad_analytics::conversation::ConversationInput;
use squad_analytics::state::memory::MemoryAnalysisStore;
use squad_analytics::state::AnalysisStore;
use squad_analytics::utils::tracing::init_tracing;
use tracing::{info, warn};

/// One entry of the input batch
#[derive(Debug, Deserialize)]
struct BatchEntry {
    #[serde(default)]
    conversation: ConversationInput,
    #[serde(default)]
    agent: Option<String>,
}

fn load_configuration(path: &str) -> Result<Configuration, Box<dyn std::error::Error + Send + Sync>> {
    if !Path::new(path).exists() {
        eprintln!("{} not found, using default configuration", path);
        return Ok(Configuration::default());
    }
    eprintln!("loading squad configuration from {}", path);
    Ok(Configuration::load(path)?)
}

fn read_batch() -> Result<Vec<BatchEntry>, Box<dyn std::error::Error + Send + Sync>> {
    let contents = match env::var(CONVERSATIONS_PATH_ENV) {
        Ok(path) => fs::read_to_string(&path)?,
        Err(_) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&contents)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // configuration is read before tracing init so the log level can come from it
    let config_path =
        env::var(SQUAD_CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_SQUAD_CONFIG_PATH.to_string());
    let config = load_configuration(&config_path)?;

    init_tracing(&config.log_level());
    info!(path = %config_path, "configuration loaded");

    let context = ServiceContext::new(config);
    let squad = AgentSquad::new(&context);
    let store: Arc<dyn AnalysisStore> = Arc::new(MemoryAnalysisStore::new());
    let analyzer = ConversationAnalyzer::new(&context, store);

    let batch = read_batch()?;
    info!(conversations = batch.len(), "batch received");

    for entry in batch {
        let agent_name = entry
            .agent
            .unwrap_or_else(|| AgentKind::Leo.name().to_string());

        let agent = match squad.get(&agent_name) {
            Ok(agent) => agent,
            Err(err) => {
                warn!(
                    conversation_id = %entry.conversation.id,
                    agent = %agent_name,
                    error = %err,
                    "skipping conversation"
                );
                continue;
            }
        };

        let response = agent.process_message(&entry.conversation).await;
        analyzer
            .analyze_conversation(&entry.conversation, &response)
            .await;
    }

    let analytics = analyzer.get_conversation_analytics(None).await;
    println!("{}", serde_json::to_string_pretty(&analytics)?);

    info!(health = ?analyzer.health_check().await.status, "done");
    Ok(())
}
