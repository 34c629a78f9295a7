//! Shared application state.

use anyhow::Result;

use crate::config::ServiceConfig;
use crate::store::{DemoStore, SampleStore};

/// Shared application state, built once at startup.
pub struct AppState {
    /// Static collection configuration.
    pub config: ServiceConfig,

    /// Base URL for building links.
    pub base_url: String,

    /// The forecast store behind the encoders.
    pub store: Box<dyn SampleStore>,
}

impl AppState {
    /// Create application state from a config directory and base URL.
    pub fn new(config_dir: &str, base_url: impl Into<String>) -> Result<Self> {
        let config = ServiceConfig::load_from_dir(config_dir)?;

        Ok(Self {
            config,
            base_url: base_url.into(),
            store: Box::new(DemoStore),
        })
    }

    /// State backed by the demo configuration, for tests.
    pub fn demo(base_url: impl Into<String>) -> Self {
        Self {
            config: ServiceConfig::demo(),
            base_url: base_url.into(),
            store: Box::new(DemoStore),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_state() {
        let state = AppState::demo("http://localhost:8080");
        assert_eq!(state.base_url, "http://localhost:8080");
        assert!(state.config.find_collection("MEPS").is_some());
    }

    #[test]
    fn test_new_with_missing_dir_uses_demo_config() {
        let state = AppState::new("/does/not/exist", "http://localhost:8080").unwrap();
        assert_eq!(state.config.collections.len(), 1);
    }
}
