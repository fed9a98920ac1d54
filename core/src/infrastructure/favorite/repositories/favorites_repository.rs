use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, Statement, Value};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    favorite::{entities::FavoritesRecord, ports::FavoritesRepository},
};
use crate::entity::favorites::Entity as FavoritesEntity;

// Union without duplicates. The record is created on first use.
const ADD_FAVORITE: &str = r#"
INSERT INTO favorites (user_id, favorite_recipe_ids, updated_at)
VALUES ($1, jsonb_build_array($2::text), NOW())
ON CONFLICT (user_id) DO UPDATE SET
    favorite_recipe_ids = CASE
        WHEN favorites.favorite_recipe_ids @> jsonb_build_array($2::text)
            THEN favorites.favorite_recipe_ids
        ELSE favorites.favorite_recipe_ids || jsonb_build_array($2::text)
    END,
    updated_at = NOW()
"#;

const REMOVE_FAVORITE: &str = r#"
UPDATE favorites
SET favorite_recipe_ids = favorite_recipe_ids - $2::text,
    updated_at = NOW()
WHERE user_id = $1
"#;

#[derive(Debug, Clone)]
pub struct PostgresFavoritesRepository {
    pub db: DatabaseConnection,
}

impl PostgresFavoritesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn execute(&self, sql: &str, user_id: Uuid, recipe_id: Uuid) -> Result<u64, CoreError> {
        let statement = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [Value::from(user_id), Value::from(recipe_id.to_string())],
        );

        let result = self.db.execute(statement).await.map_err(|e| {
            error!("Failed to write favorites: {}", e);
            CoreError::Storage("could not update favorites".to_string())
        })?;

        Ok(result.rows_affected())
    }
}

impl FavoritesRepository for PostgresFavoritesRepository {
    async fn get(&self, user_id: Uuid) -> Result<Option<FavoritesRecord>, CoreError> {
        let model = FavoritesEntity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to load favorites: {}", e);
                CoreError::Storage("could not load favorites".to_string())
            })?;

        Ok(model.as_ref().map(FavoritesRecord::from))
    }

    #[instrument(skip(self))]
    async fn add_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), CoreError> {
        self.execute(ADD_FAVORITE, user_id, recipe_id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), CoreError> {
        let rows = self.execute(REMOVE_FAVORITE, user_id, recipe_id).await?;

        if rows == 0 {
            return Err(CoreError::NotFound(format!("favorites of user {user_id}")));
        }

        Ok(())
    }
}
