//! Access gate - authentication and role-based authorization.
//!
//! Credentials are checked against Argon2 hashes through the domain
//! `Password` value object. An unknown username and a wrong password are
//! indistinguishable to the caller: both yield `None`, and both run a full
//! hash verification.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, SeedAccounts};
use domain::{Action, Password, User, DUMMY_PASSWORD_HASH};

use crate::repository::{NewAccount, UserRepository};

/// Access gate trait for dependency injection.
#[async_trait]
pub trait AccessGate: Send + Sync {
    /// Check a username/password pair; `None` when either is wrong
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>>;

    /// Whether the user's role permits the action
    fn authorize(&self, user: &User, action: Action) -> bool;

    /// Resolve a user from a session subject
    async fn find_user(&self, id: i32) -> AppResult<Option<User>>;

    /// Create the seed accounts if no user exists yet; returns how many were created
    async fn ensure_seed_accounts(&self, seeds: &SeedAccounts) -> AppResult<usize>;
}

/// Concrete implementation of AccessGate using a user repository.
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
}

impl Authenticator {
    /// Create new access gate with repository
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

/// Check and hash every seed account before any is stored.
fn seed_records(seeds: &SeedAccounts) -> AppResult<Vec<NewAccount>> {
    let [admin, user] = seeds.accounts();
    if admin.username.trim().is_empty() || user.username.trim().is_empty() {
        return Err(AppError::validation("Seed usernames must not be empty"));
    }
    if admin.username == user.username {
        return Err(AppError::validation(format!(
            "Seed accounts share the username '{}'",
            admin.username
        )));
    }

    seeds
        .accounts()
        .into_iter()
        .map(|account| -> AppResult<NewAccount> {
            let password = Password::new(&account.password)?;
            Ok(NewAccount {
                username: account.username.clone(),
                password_hash: password.into_string(),
                role: account.role,
            })
        })
        .collect()
}

#[async_trait]
impl AccessGate for Authenticator {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<Option<User>> {
        let Some(user) = self.users.find_by_username(username).await? else {
            let _ = Password::from_hash(DUMMY_PASSWORD_HASH).verify(password);
            warn!("Login rejected");
            return Ok(None);
        };

        if !Password::from_hash(user.password_hash.as_str()).verify(password) {
            warn!(user_id = user.id, "Login rejected");
            return Ok(None);
        }

        info!(user_id = user.id, role = %user.role, "User authenticated");
        Ok(Some(user))
    }

    fn authorize(&self, user: &User, action: Action) -> bool {
        let allowed = user.can(action);
        if !allowed {
            debug!(user_id = user.id, %action, "Action denied");
        }
        allowed
    }

    async fn find_user(&self, id: i32) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn ensure_seed_accounts(&self, seeds: &SeedAccounts) -> AppResult<usize> {
        if self.users.count().await? > 0 {
            return Ok(0);
        }

        let accounts = seed_records(seeds)?;
        let created = self.users.create_all(accounts).await?.len();

        warn!(created, "Seed accounts created from configured credentials");
        Ok(created)
    }
}
