//! Common utilities shared across the inventory crates.
//!
//! This crate provides:
//! - Unified error handling with HTTP response mapping
//! - Configuration structures loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
