//! Configuration management for the circulation desk

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Identifier allocation settings.
///
/// Book and reader identifiers are drawn from independent counters; these
/// are the values each counter starts from.
#[derive(Debug, Deserialize, Clone)]
pub struct IdConfig {
    pub books: u32,
    pub readers: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub ids: IdConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ids: IdConfig {
                books: 1000,
                readers: 1000,
            },
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables (with prefix CIRCDESK_)
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default configuration
            .set_default("ids.books", 1000)?
            .set_default("ids.readers", 1000)?
            // Layer on environment variables (CIRCDESK_IDS_BOOKS, CIRCDESK_IDS_READERS)
            .add_source(
                Environment::with_prefix("CIRCDESK")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
