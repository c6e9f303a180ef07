use anyhow::Result;
use std::sync::Arc;

use crate::Config;

/// Application state and lifecycle manager
pub struct App {
    config: Arc<Config>,
}

impl App {
    /// Create a new application instance from the on-disk configuration
    pub fn new() -> Result<Self> {
        let (config, _validation) = Config::load_validated()?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Prepare directories the session store and config rely on
    pub fn initialize(&mut self) -> Result<()> {
        std::fs::create_dir_all(&self.config.config_dir)?;
        tracing::info!(
            "Application initialized (config dir: {})",
            self.config.config_dir.display()
        );
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the config for service construction
    pub fn shared_config(&self) -> Arc<Config> {
        self.config.clone()
    }
}
