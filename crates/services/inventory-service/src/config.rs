//! Inventory service configuration.

use common::{ConfigError, DatabaseConfig, SeedAccounts};

/// Inventory service configuration.
#[derive(Debug, Clone, Default)]
pub struct InventoryServiceConfig {
    /// SQLite database location and pool sizing
    pub database: DatabaseConfig,
    /// Accounts created when the user table is empty
    pub seeds: SeedAccounts,
}

impl InventoryServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseConfig::from_env()?,
            seeds: SeedAccounts::from_env(),
        })
    }

    /// Configuration pointing at the given database URL, all else default.
    pub fn with_database_url(url: impl Into<String>) -> Self {
        Self {
            database: DatabaseConfig::with_url(url),
            ..Self::default()
        }
    }
}
