use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::error;

use crate::domain::authentication::{
    entities::{AuthUser, UserCredential},
    ports::UserRepository,
};
use crate::domain::common::entities::app_errors::CoreError;
use crate::entity::users::{Column as UserColumn, Entity as UserEntity, Model as UserModel};

impl From<UserModel> for UserCredential {
    fn from(model: UserModel) -> Self {
        Self {
            user: AuthUser {
                id: model.id,
                email: model.email,
            },
            password_hash: model.password_hash,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn get_by_email(&self, email: &str) -> Result<Option<UserCredential>, CoreError> {
        let model = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get user by email: {}", e);
                CoreError::Storage("could not load user".to_string())
            })?;

        Ok(model.map(UserCredential::from))
    }
}
