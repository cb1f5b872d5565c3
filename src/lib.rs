// Two stateless handlers: /api/process builds a site, /api/update edits one.

pub mod commands;
pub mod config;
pub mod engine;
pub mod llm;
pub mod postprocessing;
pub mod preprocessing;
pub mod server;

use crate::commands::AppState;
use crate::config::{Config, EnvCredentials};
use crate::llm::HttpChatClient;
use anyhow::Context;
use std::sync::Arc;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let client = HttpChatClient::new(&config).context("Failed to create HTTP client")?;
    let credentials = EnvCredentials::new(config.credential_var.clone());
    let state = AppState::new(config, Arc::new(client), Arc::new(credentials));

    server::serve(state).await.context("HTTP server failed")?;
    Ok(())
}
