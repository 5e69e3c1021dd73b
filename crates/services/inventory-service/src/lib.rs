//! Inventory Service Library
//!
//! Product catalogue store, access gate and spreadsheet export over a
//! SQLite database. Used by the gateway for HTTP access and by the
//! `inventory-service` binary for operator commands.

pub mod config;
pub mod export;
pub mod infra;
pub mod repository;
pub mod service;

use std::path::Path;

use tracing::info;

use common::AppResult;
use domain::ProductOrder;

use crate::config::InventoryServiceConfig;
use crate::infra::Database;
use crate::service::Services;

/// Connect, migrate and seed: everything needed before serving requests.
pub async fn bootstrap(config: &InventoryServiceConfig) -> AppResult<(Database, Services)> {
    let (db, services) = open(config).await?;
    services.gate().ensure_seed_accounts(&config.seeds).await?;

    Ok((db, services))
}

/// Connect and migrate without touching the user table.
async fn open(config: &InventoryServiceConfig) -> AppResult<(Database, Services)> {
    let db = Database::connect(&config.database).await?;
    let services = Services::from_connection(db.get_connection());

    Ok((db, services))
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Run a migration command.
pub async fn run_migrations(
    config: &InventoryServiceConfig,
    action: MigrateAction,
) -> AppResult<()> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations");
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Create the seed accounts if the user table is empty.
pub async fn run_seed(config: &InventoryServiceConfig) -> AppResult<usize> {
    let (_db, services) = open(config).await?;
    services.gate().ensure_seed_accounts(&config.seeds).await
}

/// Export every product to an xlsx file.
pub async fn run_export(config: &InventoryServiceConfig, output: &Path) -> AppResult<usize> {
    let (_db, services) = open(config).await?;
    let products = services.inventory().list_all(ProductOrder::Oldest).await?;

    export::write_to_path(&products, output)?;
    info!(count = products.len(), path = %output.display(), "Products exported");

    Ok(products.len())
}

/// Print products at or below their reorder level.
pub async fn run_low_stock(config: &InventoryServiceConfig) -> AppResult<()> {
    let (_db, services) = open(config).await?;
    let products = services.inventory().low_stock().await?;

    if products.is_empty() {
        println!("No products are low on stock");
        return Ok(());
    }

    println!("{:>6}  {:<32} {:>10} {:>10}", "id", "name", "quantity", "reorder");
    for product in products {
        println!(
            "{:>6}  {:<32} {:>10} {:>10}",
            product.id, product.name, product.quantity, product.reorder_level
        );
    }

    Ok(())
}

/// Print inventory totals as JSON.
pub async fn run_metrics(config: &InventoryServiceConfig) -> AppResult<()> {
    let (_db, services) = open(config).await?;
    let metrics = services.inventory().metrics().await?;

    let rendered = serde_json::to_string_pretty(&metrics)
        .map_err(|e| common::AppError::internal(e.to_string()))?;
    println!("{}", rendered);

    Ok(())
}
