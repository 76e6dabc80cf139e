use std::sync::Arc;

use casework_core::validation::messages::MessageCatalog;
use casework_core::validation::registry::ClusterRegistry;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cluster definitions, checked once at startup.
    pub registry: Arc<ClusterRegistry>,
    /// User-facing copy for violation messages.
    pub messages: Arc<MessageCatalog>,
}

impl AppState {
    /// Build the registry and message catalog for `config`.
    pub fn build(config: ServerConfig) -> Result<Self, casework_core::error::CoreError> {
        let registry = ClusterRegistry::with_defaults()?;
        let messages = match &config.message_catalog_path {
            Some(path) => MessageCatalog::from_json_file(path)?,
            None => MessageCatalog::english(),
        };
        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            messages: Arc::new(messages),
        })
    }
}
