use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::Recipe,
        value_objects::{CreateRecipeInput, RecipePatch, UpdateRecipeInput},
    },
    storage::value_objects::ImageUpload,
};

/// Persistence for the shared `recipes` collection.
pub trait RecipeRepository: Send + Sync {
    /// Every stored recipe, no pagination.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn get_by_id(
        &self,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<Option<Recipe>, CoreError>> + Send;

    fn create(&self, recipe: Recipe) -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    /// Writes only the fields set in `patch`. Fails with `NotFound` when no
    /// record has `recipe_id`.
    fn update(
        &self,
        recipe_id: Uuid,
        patch: RecipePatch,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Removes the record. Favorites pointing at it are left alone.
    fn delete(&self, recipe_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait RecipeService: Send + Sync {
    fn list_recipes(&self) -> impl Future<Output = Result<Vec<Recipe>, CoreError>> + Send;

    fn get_recipe(&self, recipe_id: Uuid)
    -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    fn create_recipe(
        &self,
        input: CreateRecipeInput,
    ) -> impl Future<Output = Result<Recipe, CoreError>> + Send;

    /// Returns the patch as written, including the URL of a new image.
    fn update_recipe(
        &self,
        input: UpdateRecipeInput,
    ) -> impl Future<Output = Result<RecipePatch, CoreError>> + Send;

    fn delete_recipe(&self, recipe_id: Uuid) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Stores the image and returns its public URL.
    fn upload_image(
        &self,
        image: ImageUpload,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}
