//! Service layer - inventory and access use cases.

mod access_gate;
mod container;
mod inventory_service;

pub use access_gate::{AccessGate, Authenticator};
pub use container::Services;
pub use inventory_service::{InventoryManager, InventoryService};
