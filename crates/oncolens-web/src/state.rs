//! Shared application state for the web server.

use std::sync::Arc;
use std::time::Duration;

use oncolens_client::{HttpPredictor, Predictor};
use oncolens_common::config::Config;
use oncolens_common::error::Result;

use crate::session::SessionStore;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub predictor: Arc<dyn Predictor>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, predictor: Arc<dyn Predictor>) -> Self {
        let ttl = Duration::from_secs(config.server.session_ttl_secs);
        let sessions = SessionStore::new(ttl, config.prediction.timeout());
        Self { config, predictor, sessions }
    }

    /// State wired to the real HTTP predictor.
    pub fn from_config(config: Config) -> Result<Self> {
        let predictor = HttpPredictor::from_config(&config.prediction)?;
        Ok(Self::new(config, Arc::new(predictor)))
    }
}

pub type SharedState = Arc<AppState>;
