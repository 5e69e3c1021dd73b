//! Service container - wires repositories into services.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{AccessGate, Authenticator, InventoryManager, InventoryService};
use crate::repository::{ProductStore, UserStore};

/// Shared handles to every service, cheap to clone.
#[derive(Clone)]
pub struct Services {
    inventory: Arc<dyn InventoryService>,
    gate: Arc<dyn AccessGate>,
}

impl Services {
    /// Create a container from already built services
    pub fn new(inventory: Arc<dyn InventoryService>, gate: Arc<dyn AccessGate>) -> Self {
        Self { inventory, gate }
    }

    /// Build the store-backed services on one connection pool
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let products = Arc::new(ProductStore::new(db.clone()));
        let users = Arc::new(UserStore::new(db));

        Self {
            inventory: Arc::new(InventoryManager::new(products)),
            gate: Arc::new(Authenticator::new(users)),
        }
    }

    /// Get inventory service
    pub fn inventory(&self) -> Arc<dyn InventoryService> {
        self.inventory.clone()
    }

    /// Get access gate
    pub fn gate(&self) -> Arc<dyn AccessGate> {
        self.gate.clone()
    }
}
