use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{entities::Recipe, ports::RecipeRepository, value_objects::RecipePatch},
};
use crate::entity::recipes::{Column as RecipeColumn, Entity as RecipeEntity};
use crate::infrastructure::recipe::mappers::{patch_to_active_model, to_active_model};

#[derive(Debug, Clone)]
pub struct PostgresRecipeRepository {
    pub db: DatabaseConnection,
}

impl PostgresRecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl RecipeRepository for PostgresRecipeRepository {
    async fn list_all(&self) -> Result<Vec<Recipe>, CoreError> {
        let models = RecipeEntity::find()
            .order_by_asc(RecipeColumn::CreatedAt)
            .order_by_asc(RecipeColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list recipes: {}", e);
                CoreError::Storage("could not load recipes".to_string())
            })?;

        Ok(models.iter().map(Recipe::from).collect())
    }

    async fn get_by_id(&self, recipe_id: Uuid) -> Result<Option<Recipe>, CoreError> {
        let model = RecipeEntity::find_by_id(recipe_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get recipe by id: {}", e);
                CoreError::Storage("could not load recipe".to_string())
            })?;

        Ok(model.as_ref().map(Recipe::from))
    }

    #[instrument(skip(self, recipe), fields(recipe_id = %recipe.id))]
    async fn create(&self, recipe: Recipe) -> Result<Recipe, CoreError> {
        to_active_model(&recipe)?
            .insert(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create recipe: {}", e);
                CoreError::Storage("could not save recipe".to_string())
            })?;

        Ok(recipe)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, recipe_id: Uuid, patch: RecipePatch) -> Result<(), CoreError> {
        let result = RecipeEntity::update_many()
            .set(patch_to_active_model(&patch)?)
            .filter(RecipeColumn::Id.eq(recipe_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to update recipe: {}", e);
                CoreError::Storage("could not update recipe".to_string())
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound(format!("recipe {recipe_id}")));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, recipe_id: Uuid) -> Result<(), CoreError> {
        RecipeEntity::delete_by_id(recipe_id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to delete recipe: {}", e);
                CoreError::Storage("could not delete recipe".to_string())
            })?;

        Ok(())
    }
}
