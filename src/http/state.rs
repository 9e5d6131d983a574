use std::sync::Arc;
use std::time::Duration;

use crate::adapters::webuntis::WebUntisProvider;
use crate::config::{UntisConfig, CLIENT_NAME};
use crate::core::service::TimetableService;
use crate::utils::error::Result;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TimetableService>,
}

impl AppState {
    pub fn new(service: TimetableService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Wires the WebUntis client for `config` into a ready-to-serve state.
    pub fn from_config(config: &UntisConfig, timeout: Duration) -> Result<Self> {
        let provider = WebUntisProvider::new(&config.server, &config.school, CLIENT_NAME, timeout)?;
        tracing::debug!("WebUntis endpoint: {}", provider.endpoint());

        let service = TimetableService::new(
            Arc::new(provider),
            config.credentials(),
            config.class_name.clone(),
        );
        Ok(Self::new(service))
    }
}
