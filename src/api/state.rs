use std::sync::Arc;

use crate::{
    config::{Config, ScoringConfig},
    store::MemoryLibrary,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Catalog, accounts, and reading logs
    pub library: Arc<MemoryLibrary>,
    /// Fixed scoring constants handed to every recommender call
    pub scoring: ScoringConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates state with default scoring constants
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    /// Creates state with scoring constants derived from the app config
    pub fn with_config(config: &Config) -> Self {
        Self {
            library: Arc::new(MemoryLibrary::new()),
            scoring: ScoringConfig::from_config(config),
        }
    }
}
