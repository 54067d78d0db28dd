//! Subcommand implementations.

/// One-shot question command handler.
pub mod ask;

/// Interactive chat command handler.
pub mod chat;

/// Configure command handler.
pub mod configure;

/// Backend health probe handler.
pub mod health;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::backend::HttpBackend;
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::session::ChatController;

/// Loads the config file and merges in the CLI endpoint override.
pub fn load_config(endpoint: Option<String>) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new()?;
    let file_config = manager.load()?;
    resolve_config(&ResolveOptions { endpoint }, &file_config)
}

/// Builds the HTTP backend described by `config`.
pub fn build_backend(config: &ResolvedConfig) -> Result<HttpBackend> {
    let backend = HttpBackend::new(&config.endpoint).with_chat_path(&config.chat_path);
    match config.timeout {
        Some(timeout) => backend
            .with_timeout(timeout)
            .context("Failed to build HTTP client"),
        None => Ok(backend),
    }
}

/// Builds a fresh chat session against the configured backend.
pub fn build_controller(config: &ResolvedConfig) -> Result<ChatController> {
    let backend = build_backend(config)?;
    Ok(ChatController::with_greeting(
        Arc::new(backend),
        config.greeting.clone(),
    ))
}
