//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr, TransactionTrait,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{User, UserRole};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// An account ready to store, password already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Store every account in one transaction; none are kept if any fails
    async fn create_all(&self, accounts: Vec<NewAccount>) -> AppResult<Vec<User>>;

    /// Number of stored users
    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::try_from).transpose()?)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::try_from).transpose()?)
    }

    async fn create_all(&self, accounts: Vec<NewAccount>) -> AppResult<Vec<User>> {
        let txn = self.db.begin().await?;

        let mut created = Vec::with_capacity(accounts.len());
        for account in accounts {
            let username = account.username.clone();
            let active_model = ActiveModel {
                username: Set(account.username),
                password_hash: Set(account.password_hash),
                role: Set(account.role.to_string()),
                created_at: Set(Utc::now()),
                ..Default::default()
            };

            let model = active_model.insert(&txn).await.map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::conflict(format!("User '{}'", username))
                }
                _ => AppError::from(e),
            })?;
            created.push(User::try_from(model)?);
        }

        txn.commit().await?;
        Ok(created)
    }

    async fn count(&self) -> AppResult<u64> {
        let count = UserEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }
}
