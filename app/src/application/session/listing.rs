use std::collections::BTreeSet;

use recipebox_core::domain::{favorite::entities::is_favorite, recipe::entities::Recipe};
use uuid::Uuid;

/// Case-insensitive substring match on title or description. An empty term
/// matches everything.
pub fn matches_search(recipe: &Recipe, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    recipe.title.to_lowercase().contains(&term)
        || recipe.description.to_lowercase().contains(&term)
}

/// Filtered list with favorites first. Within each group the load order is
/// kept.
pub fn visible_recipes<'a>(
    recipes: &'a [Recipe],
    favorites: &BTreeSet<Uuid>,
    term: &str,
) -> Vec<&'a Recipe> {
    let mut visible: Vec<&Recipe> = recipes
        .iter()
        .filter(|recipe| matches_search(recipe, term))
        .collect();

    // sort_by_key is stable
    visible.sort_by_key(|recipe| !is_favorite(favorites, recipe.id));
    visible
}
