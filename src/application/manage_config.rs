//! Config management use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};

/// Service for reading and changing `.journo/config.toml`
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.repository.load_config()?.get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;
        config.set(key, value)?;
        self.repository.save_config(&config)?;
        tracing::info!(key, "updated config");
        Ok(())
    }

    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
