//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! products and their low-stock rule, users and their roles, the capability
//! table that decides which role may perform which inventory action, and
//! password hashing.

pub mod access;
pub mod constants;
pub mod error;
pub mod password;
pub mod product;
pub mod user;

pub use access::Action;
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Password, DUMMY_PASSWORD_HASH};
pub use product::{InventoryMetrics, NewProduct, Product, ProductChanges, ProductOrder};
pub use user::{User, UserResponse, UserRole};
