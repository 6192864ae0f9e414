//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::{AdminCredentials, ServerConfig};
use crate::db::{WeatherGateway, WeatherRepository};
use crate::services::{RandomSource, ReadingGenerator};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Timeout-bounded store access for history and analysis
    pub gateway: WeatherGateway,
    /// Generator for live readings
    pub generator: ReadingGenerator,
    /// Credentials accepted by the login endpoint
    pub admin: Arc<AdminCredentials>,
}

impl AppState {
    /// Create application state around a repository with default settings.
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self::from_config(repository, &ServerConfig::default())
    }

    /// Create application state using the store deadline and credentials in `config`.
    pub fn from_config(repository: Arc<dyn WeatherRepository>, config: &ServerConfig) -> Self {
        let gateway = WeatherGateway::with_timeout(repository, config.io_timeout);
        Self {
            generator: ReadingGenerator::new(gateway.clone()),
            gateway,
            admin: Arc::new(config.admin.clone()),
        }
    }

    /// Replace the generator's randomness source.
    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.generator = ReadingGenerator::with_random(self.gateway.clone(), random);
        self
    }
}
