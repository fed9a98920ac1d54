use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Favorite recipe ids of one user. Stored lazily on the first add.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesRecord {
    pub user_id: Uuid,
    pub favorite_recipe_ids: BTreeSet<Uuid>,
}

impl FavoritesRecord {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            favorite_recipe_ids: BTreeSet::new(),
        }
    }
}

pub fn is_favorite(favorites: &BTreeSet<Uuid>, recipe_id: Uuid) -> bool {
    favorites.contains(&recipe_id)
}
