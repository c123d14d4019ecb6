//! Identity repository - credential store access for enrollment and login.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Identity, NewIdentity};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Identity repository trait for dependency injection.
///
/// Identities are created once and only read afterwards; there are no
/// update or delete operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Find an identity by its (already normalized) email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>>;

    /// Insert a new identity in a single statement.
    ///
    /// # Errors
    /// `DuplicateIdentity` when the email's unique index rejects the row,
    /// `StoreUnavailable` for any other store failure.
    async fn create(&self, identity: NewIdentity) -> AppResult<Identity>;
}

/// SeaORM-backed identity repository
pub struct IdentityStore {
    db: DatabaseConnection,
}

impl IdentityStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IdentityRepository for IdentityStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Identity>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Identity::from))
    }

    async fn create(&self, identity: NewIdentity) -> AppResult<Identity> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(identity.name),
            email: Set(identity.email),
            phone: Set(identity.phone),
            password_hash: Set(identity.password_hash),
            face_template: Set(identity.face_template),
            // Column default; the store stamps creation time
            created_at: NotSet,
        };

        let model = active_model.insert(&self.db).await.map_err(map_insert_error)?;
        Ok(Identity::from(model))
    }
}

/// A unique violation can only come from the email index.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::DuplicateIdentity,
        _ => AppError::from(err),
    }
}
