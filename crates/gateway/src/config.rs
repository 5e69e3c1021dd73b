//! Gateway configuration.

use std::env;

use common::{env_parse, ConfigError, JwtConfig};
use inventory_service_lib::config::InventoryServiceConfig;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Session token signing
    pub jwt: JwtConfig,
    /// Database and seed accounts of the inventory store
    pub inventory: InventoryServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parse("GATEWAY_PORT", 3000)?,
            jwt: JwtConfig::from_env()?,
            inventory: InventoryServiceConfig::from_env()?,
        })
    }

    /// Socket address string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
