//! In-memory adapters for every port, backed by one shared store.
//!
//! Clones share state, so a test can keep a handle to the backend it hands
//! to a [`Service`] and inspect or break it afterwards.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::Arc,
};

use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    authentication::{
        entities::{AuthUser, UserCredential},
        ports::UserRepository,
        value_objects::normalize_email,
    },
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    favorite::{entities::FavoritesRecord, ports::FavoritesRepository},
    recipe::{entities::Recipe, ports::RecipeRepository, value_objects::RecipePatch},
    storage::ports::ObjectStoragePort,
};
use crate::infrastructure::crypto::argon2_hasher::Argon2Hasher;

pub type InMemoryService =
    Service<InMemoryBackend, InMemoryBackend, InMemoryBackend, Argon2Hasher, InMemoryBackend>;

/// Which backend a failure is injected into or a write is counted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    Recipes,
    Favorites,
    Users,
    Objects,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
struct Store {
    recipes: Vec<Recipe>,
    favorites: HashMap<Uuid, FavoritesRecord>,
    users: Vec<UserCredential>,
    objects: BTreeMap<String, StoredImage>,
    unavailable: HashSet<Port>,
    writes: HashMap<Port, usize>,
}

impl Store {
    fn check(&self, port: Port) -> Result<(), CoreError> {
        if self.unavailable.contains(&port) {
            return Err(CoreError::Storage(format!("{port:?} backend unavailable")));
        }
        Ok(())
    }

    fn count_write(&mut self, port: Port) {
        *self.writes.entry(port).or_default() += 1;
    }
}

#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    store: Arc<RwLock<Store>>,
    public_base_url: String,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new("memory://recipebox")
    }
}

impl InMemoryBackend {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            public_base_url: public_base_url.into(),
        }
    }

    /// Service wired to this backend for every port.
    pub fn service(&self, hasher: Argon2Hasher) -> InMemoryService {
        Service::new(self.clone(), self.clone(), self.clone(), hasher, self.clone())
    }

    pub async fn seed_recipes(&self, recipes: impl IntoIterator<Item = Recipe>) {
        self.store.write().await.recipes.extend(recipes);
    }

    pub async fn seed_user(&self, email: &str, password_hash: String) -> AuthUser {
        let user = AuthUser {
            id: generate_uuid_v7(),
            email: normalize_email(email),
        };

        self.store.write().await.users.push(UserCredential {
            user: user.clone(),
            password_hash,
        });

        user
    }

    pub async fn recipes(&self) -> Vec<Recipe> {
        self.store.read().await.recipes.clone()
    }

    pub async fn object(&self, object_key: &str) -> Option<StoredImage> {
        self.store.read().await.objects.get(object_key).cloned()
    }

    pub async fn set_unavailable(&self, port: Port, unavailable: bool) {
        let mut store = self.store.write().await;
        if unavailable {
            store.unavailable.insert(port);
        } else {
            store.unavailable.remove(&port);
        }
    }

    /// Successful writes made through `port` so far.
    pub async fn writes(&self, port: Port) -> usize {
        self.store
            .read()
            .await
            .writes
            .get(&port)
            .copied()
            .unwrap_or_default()
    }
}

impl RecipeRepository for InMemoryBackend {
    async fn list_all(&self) -> Result<Vec<Recipe>, CoreError> {
        let store = self.store.read().await;
        store.check(Port::Recipes)?;
        Ok(store.recipes.clone())
    }

    async fn get_by_id(&self, recipe_id: Uuid) -> Result<Option<Recipe>, CoreError> {
        let store = self.store.read().await;
        store.check(Port::Recipes)?;
        Ok(store.recipes.iter().find(|r| r.id == recipe_id).cloned())
    }

    async fn create(&self, recipe: Recipe) -> Result<Recipe, CoreError> {
        let mut store = self.store.write().await;
        store.check(Port::Recipes)?;
        store.recipes.push(recipe.clone());
        store.count_write(Port::Recipes);
        Ok(recipe)
    }

    async fn update(&self, recipe_id: Uuid, patch: RecipePatch) -> Result<(), CoreError> {
        let mut store = self.store.write().await;
        store.check(Port::Recipes)?;

        let recipe = store
            .recipes
            .iter_mut()
            .find(|r| r.id == recipe_id)
            .ok_or_else(|| CoreError::NotFound(format!("recipe {recipe_id}")))?;
        recipe.apply(&patch);

        store.count_write(Port::Recipes);
        Ok(())
    }

    async fn delete(&self, recipe_id: Uuid) -> Result<(), CoreError> {
        let mut store = self.store.write().await;
        store.check(Port::Recipes)?;
        store.recipes.retain(|r| r.id != recipe_id);
        store.count_write(Port::Recipes);
        Ok(())
    }
}

impl FavoritesRepository for InMemoryBackend {
    async fn get(&self, user_id: Uuid) -> Result<Option<FavoritesRecord>, CoreError> {
        let store = self.store.read().await;
        store.check(Port::Favorites)?;
        Ok(store.favorites.get(&user_id).cloned())
    }

    async fn add_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), CoreError> {
        let mut store = self.store.write().await;
        store.check(Port::Favorites)?;
        store
            .favorites
            .entry(user_id)
            .or_insert_with(|| FavoritesRecord::new(user_id))
            .favorite_recipe_ids
            .insert(recipe_id);
        store.count_write(Port::Favorites);
        Ok(())
    }

    async fn remove_recipe(&self, user_id: Uuid, recipe_id: Uuid) -> Result<(), CoreError> {
        let mut store = self.store.write().await;
        store.check(Port::Favorites)?;
        store
            .favorites
            .get_mut(&user_id)
            .ok_or_else(|| CoreError::NotFound(format!("favorites of user {user_id}")))?
            .favorite_recipe_ids
            .remove(&recipe_id);
        store.count_write(Port::Favorites);
        Ok(())
    }
}

impl UserRepository for InMemoryBackend {
    async fn get_by_email(&self, email: &str) -> Result<Option<UserCredential>, CoreError> {
        let store = self.store.read().await;
        store.check(Port::Users)?;
        Ok(store.users.iter().find(|c| c.user.email == email).cloned())
    }
}

impl ObjectStoragePort for InMemoryBackend {
    async fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), CoreError> {
        let mut store = self.store.write().await;
        store.check(Port::Objects)?;
        store.objects.insert(
            object_key.to_string(),
            StoredImage {
                content_type: content_type.to_string(),
                bytes: payload,
            },
        );
        store.count_write(Port::Objects);
        Ok(())
    }

    fn public_url(&self, object_key: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), object_key)
    }
}
