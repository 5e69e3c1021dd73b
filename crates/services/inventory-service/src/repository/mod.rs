//! Repository layer for data access.

pub mod entities;
mod product_repository;
mod user_repository;

pub use product_repository::{ProductRepository, ProductStore};
pub use user_repository::{NewAccount, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
