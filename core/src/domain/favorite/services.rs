use std::collections::BTreeSet;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{
    authentication::ports::{HasherRepository, UserRepository},
    common::{entities::app_errors::CoreError, services::Service},
    favorite::ports::{FavoriteService, FavoritesRepository},
    recipe::ports::RecipeRepository,
    storage::ports::ObjectStoragePort,
};

impl<RR, FR, U, H, OS> FavoriteService for Service<RR, FR, U, H, OS>
where
    RR: RecipeRepository,
    FR: FavoritesRepository,
    U: UserRepository,
    H: HasherRepository,
    OS: ObjectStoragePort,
{
    async fn get_favorites(&self, user_id: Uuid) -> Result<BTreeSet<Uuid>, CoreError> {
        Ok(self
            .favorites_repository
            .get(user_id)
            .await?
            .map(|record| record.favorite_recipe_ids)
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn add_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), CoreError> {
        self.favorites_repository
            .add_recipe(user_id, recipe_id)
            .await?;
        info!("favorite added");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_favorite(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), CoreError> {
        self.favorites_repository
            .remove_recipe(user_id, recipe_id)
            .await?;
        info!("favorite removed");
        Ok(())
    }
}
