use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    authentication::ports::{HasherRepository, UserRepository},
    common::{entities::app_errors::CoreError, services::Service},
    favorite::ports::FavoritesRepository,
    recipe::{
        entities::Recipe,
        ports::{RecipeRepository, RecipeService},
        value_objects::{CreateRecipeInput, RecipePatch, UpdateRecipeInput},
    },
    storage::{ports::ObjectStoragePort, value_objects::ImageUpload},
};

impl<RR, FR, U, H, OS> RecipeService for Service<RR, FR, U, H, OS>
where
    RR: RecipeRepository,
    FR: FavoritesRepository,
    U: UserRepository,
    H: HasherRepository,
    OS: ObjectStoragePort,
{
    async fn list_recipes(&self) -> Result<Vec<Recipe>, CoreError> {
        self.recipe_repository.list_all().await
    }

    async fn get_recipe(&self, recipe_id: Uuid) -> Result<Recipe, CoreError> {
        self.recipe_repository
            .get_by_id(recipe_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("recipe {recipe_id}")))
    }

    #[instrument(skip(self, input), fields(title = %input.fields.title))]
    async fn create_recipe(&self, input: CreateRecipeInput) -> Result<Recipe, CoreError> {
        input.fields.validate()?;
        if let Some(image) = &input.image {
            image.validate()?;
        }

        let image_url = match input.image {
            Some(image) => self.upload_image(image).await?,
            None => String::new(),
        };

        let recipe = self
            .recipe_repository
            .create(Recipe::new(input.fields, image_url))
            .await?;

        info!(recipe_id = %recipe.id, "recipe created");
        Ok(recipe)
    }

    #[instrument(skip(self, input), fields(recipe_id = %input.recipe_id))]
    async fn update_recipe(&self, input: UpdateRecipeInput) -> Result<RecipePatch, CoreError> {
        input.patch.validate()?;
        if let Some(image) = &input.image {
            image.validate()?;
        }

        let mut patch = input.patch;
        if let Some(image) = input.image {
            patch.image_url = Some(self.upload_image(image).await?);
        }

        if patch.is_empty() {
            return Ok(patch);
        }

        self.recipe_repository
            .update(input.recipe_id, patch.clone())
            .await?;

        info!("recipe updated");
        Ok(patch)
    }

    #[instrument(skip(self))]
    async fn delete_recipe(&self, recipe_id: Uuid) -> Result<(), CoreError> {
        self.recipe_repository.delete(recipe_id).await?;
        info!("recipe deleted");
        Ok(())
    }

    #[instrument(skip(self, image), fields(file_name = %image.file_name, size = image.bytes.len()))]
    async fn upload_image(&self, image: ImageUpload) -> Result<String, CoreError> {
        image.validate()?;

        let object_key = image.object_key();
        self.object_storage
            .put_object(&object_key, image.bytes, &image.content_type)
            .await?;

        Ok(self.object_storage.public_url(&object_key))
    }
}
