use std::{collections::BTreeSet, future::Future};

use uuid::Uuid;

use crate::domain::{common::entities::app_errors::CoreError, favorite::entities::FavoritesRecord};

/// Per-user favorites, one record per user keyed by the user id.
pub trait FavoritesRepository: Send + Sync {
    fn get(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Option<FavoritesRecord>, CoreError>> + Send;

    /// Set-union of `recipe_id` into the record, creating it when absent.
    fn add_recipe(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Removes `recipe_id` from an existing record. A missing record is
    /// `NotFound`.
    fn remove_recipe(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

pub trait FavoriteService: Send + Sync {
    /// Empty when the user has no record yet.
    fn get_favorites(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = Result<BTreeSet<Uuid>, CoreError>> + Send;

    fn add_favorite(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn remove_favorite(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}
