//! Access gate tests against a seeded SQLite database.

mod support;

use common::{AppError, SeedAccount, SeedAccounts};
use domain::{Action, UserRole};
use inventory_service_lib::config::InventoryServiceConfig;

use support::seeded_store;

#[tokio::test]
async fn test_seeded_admin_authenticates() {
    let store = seeded_store().await;
    let gate = store.services.gate();

    let admin = gate.authenticate("admin", "admin123").await.unwrap().unwrap();
    assert_eq!(admin.username, "admin");
    assert_eq!(admin.role, UserRole::Admin);
    assert!(admin.password_hash.starts_with("$argon2id$"));

    let user = gate.authenticate("user", "user123").await.unwrap().unwrap();
    assert_eq!(user.role, UserRole::Standard);
}

#[tokio::test]
async fn test_bad_credentials_yield_none() {
    let store = seeded_store().await;
    let gate = store.services.gate();

    assert!(gate.authenticate("admin", "wrong").await.unwrap().is_none());
    assert!(gate.authenticate("ghost", "admin123").await.unwrap().is_none());
    assert!(gate.authenticate("Admin", "admin123").await.unwrap().is_none());
    assert!(gate.authenticate("admin", "").await.unwrap().is_none());
}

#[tokio::test]
async fn test_standard_user_cannot_mutate() {
    let store = seeded_store().await;
    let gate = store.services.gate();
    let user = gate.authenticate("user", "user123").await.unwrap().unwrap();

    assert!(!gate.authorize(&user, Action::DeleteProduct));
    assert!(!gate.authorize(&user, Action::AddProduct));
    assert!(!gate.authorize(&user, Action::UpdateProduct));
    assert!(gate.authorize(&user, Action::ViewProducts));
    assert!(gate.authorize(&user, Action::ViewLowStock));
}

#[tokio::test]
async fn test_find_user_resolves_session_subject() {
    let store = seeded_store().await;
    let gate = store.services.gate();
    let admin = gate.authenticate("admin", "admin123").await.unwrap().unwrap();

    let found = gate.find_user(admin.id).await.unwrap().unwrap();
    assert_eq!(found.username, "admin");
    assert!(gate.find_user(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_seeding_runs_only_once() {
    let store = seeded_store().await;
    let gate = store.services.gate();

    let created = gate
        .ensure_seed_accounts(&store.config.seeds)
        .await
        .unwrap();
    assert_eq!(created, 0);

    let (_db, services) = inventory_service_lib::bootstrap(&store.config)
        .await
        .unwrap();
    assert!(services
        .gate()
        .authenticate("admin", "admin123")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_custom_seed_accounts() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let mut config = InventoryServiceConfig::with_database_url(url);
    config.seeds = SeedAccounts {
        admin: SeedAccount::new("boss", "s3cret", UserRole::Admin),
        user: SeedAccount::new("clerk", "counter", UserRole::Standard),
    };

    let (_db, services) = inventory_service_lib::bootstrap(&config).await.unwrap();
    let gate = services.gate();

    let boss = gate.authenticate("boss", "s3cret").await.unwrap().unwrap();
    assert!(boss.is_admin());
    assert!(gate.authenticate("admin", "admin123").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_seeding_leaves_user_table_empty() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let mut config = InventoryServiceConfig::with_database_url(url);
    config.seeds = SeedAccounts {
        admin: SeedAccount::new("boss", "s3cret", UserRole::Admin),
        user: SeedAccount::new("boss", "counter", UserRole::Standard),
    };

    let result = inventory_service_lib::bootstrap(&config).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    config.seeds.user = SeedAccount::new("clerk", "counter", UserRole::Standard);
    let (_db, services) = inventory_service_lib::bootstrap(&config).await.unwrap();
    let gate = services.gate();

    assert!(gate.authenticate("boss", "s3cret").await.unwrap().is_some());
    let clerk = gate.authenticate("clerk", "counter").await.unwrap().unwrap();
    assert_eq!(clerk.role, UserRole::Standard);
}
