//! SeaORM entities backing the inventory tables.

pub mod product;
pub mod user;
