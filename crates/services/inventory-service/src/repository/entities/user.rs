//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{DomainError, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity.
///
/// An unknown stored role is a data fault, not a caller error.
impl TryFrom<Model> for User {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let role = model.role.parse().map_err(|_| {
            DomainError::internal(format!(
                "User {} has unknown stored role '{}'",
                model.id, model.role
            ))
        })?;

        Ok(User {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            role,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::UserRole;

    fn model(role: &str) -> Model {
        Model {
            id: 7,
            username: "admin".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stored_role_is_parsed() {
        let user = User::try_from(model("admin")).unwrap();
        assert_eq!(user.role, UserRole::Admin);
    }

    #[test]
    fn test_unknown_stored_role_is_internal() {
        let result = User::try_from(model("superuser"));
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }
}
