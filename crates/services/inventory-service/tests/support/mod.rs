//! Shared fixtures for integration tests.

#![allow(dead_code)]

use tempfile::TempDir;

use inventory_service_lib::config::InventoryServiceConfig;
use inventory_service_lib::infra::Database;
use inventory_service_lib::service::Services;

/// A migrated database in a temporary directory.
///
/// The directory lives as long as the fixture, so keep it bound.
pub struct TestStore {
    pub dir: TempDir,
    pub config: InventoryServiceConfig,
    pub services: Services,
}

fn temp_config() -> (TempDir, InventoryServiceConfig) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    (dir, InventoryServiceConfig::with_database_url(url))
}

/// Migrated, empty database; no accounts are seeded.
pub async fn empty_store() -> TestStore {
    let (dir, config) = temp_config();
    let db = Database::connect(&config.database)
        .await
        .expect("connect test database");
    let services = Services::from_connection(db.get_connection());

    TestStore {
        dir,
        config,
        services,
    }
}

/// Migrated database with the default seed accounts.
pub async fn seeded_store() -> TestStore {
    let (dir, config) = temp_config();
    let (_db, services) = inventory_service_lib::bootstrap(&config)
        .await
        .expect("bootstrap test database");

    TestStore {
        dir,
        config,
        services,
    }
}
