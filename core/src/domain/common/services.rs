use crate::domain::{
    authentication::ports::{HasherRepository, UserRepository},
    favorite::ports::FavoritesRepository,
    recipe::ports::RecipeRepository,
    storage::ports::ObjectStoragePort,
};

/// Holds every backend adapter the services need. Adapters are injected by
/// the caller, so tests can swap in the in-memory implementations.
#[derive(Clone)]
pub struct Service<RR, FR, U, H, OS>
where
    RR: RecipeRepository,
    FR: FavoritesRepository,
    U: UserRepository,
    H: HasherRepository,
    OS: ObjectStoragePort,
{
    pub(crate) recipe_repository: RR,
    pub(crate) favorites_repository: FR,
    pub(crate) user_repository: U,
    pub(crate) hasher_repository: H,
    pub(crate) object_storage: OS,
}

impl<RR, FR, U, H, OS> Service<RR, FR, U, H, OS>
where
    RR: RecipeRepository,
    FR: FavoritesRepository,
    U: UserRepository,
    H: HasherRepository,
    OS: ObjectStoragePort,
{
    pub fn new(
        recipe_repository: RR,
        favorites_repository: FR,
        user_repository: U,
        hasher_repository: H,
        object_storage: OS,
    ) -> Self {
        Self {
            recipe_repository,
            favorites_repository,
            user_repository,
            hasher_repository,
            object_storage,
        }
    }
}
