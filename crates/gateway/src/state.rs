//! Application state for dependency injection.

use std::sync::Arc;

use common::AppResult;
use inventory_service_lib::infra::Database;
use inventory_service_lib::service::{AccessGate, InventoryService};

use crate::config::GatewayConfig;
use crate::session::SessionManager;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<dyn InventoryService>,
    pub gate: Arc<dyn AccessGate>,
    pub sessions: Arc<SessionManager>,
    pub database: Database,
    pub config: GatewayConfig,
}

impl AppState {
    /// Connect to the inventory database, apply migrations, seed the default
    /// accounts and open an empty session registry.
    pub async fn bootstrap(config: GatewayConfig) -> AppResult<Self> {
        let (database, services) = inventory_service_lib::bootstrap(&config.inventory).await?;

        Ok(Self {
            inventory: services.inventory(),
            gate: services.gate(),
            sessions: Arc::new(SessionManager::new(config.jwt.clone())),
            database,
            config,
        })
    }
}
