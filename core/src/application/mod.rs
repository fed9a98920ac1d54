use crate::{
    domain::common::{RecipeboxConfig, services::Service},
    infrastructure::{
        crypto::argon2_hasher::Argon2Hasher,
        db::postgres::{Postgres, PostgresConfig},
        favorite::PostgresFavoritesRepository,
        object_storage::minio::MinioObjectStorage,
        recipe::PostgresRecipeRepository,
        user::PostgresUserRepository,
    },
};

pub type RecipeboxService = Service<
    PostgresRecipeRepository,
    PostgresFavoritesRepository,
    PostgresUserRepository,
    Argon2Hasher,
    MinioObjectStorage,
>;

pub async fn create_service(config: RecipeboxConfig) -> Result<RecipeboxService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;

    Ok(Service::new(
        PostgresRecipeRepository::new(postgres.get_db()),
        PostgresFavoritesRepository::new(postgres.get_db()),
        PostgresUserRepository::new(postgres.get_db()),
        Argon2Hasher::default(),
        MinioObjectStorage::new(config.object_storage),
    ))
}
