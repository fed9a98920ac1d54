use crate::domain::favorite::entities::FavoritesRecord;
use crate::entity::favorites::Model as FavoritesModel;
use crate::infrastructure::json_list;

impl From<&FavoritesModel> for FavoritesRecord {
    fn from(model: &FavoritesModel) -> Self {
        Self {
            user_id: model.user_id,
            favorite_recipe_ids: json_list(&model.favorite_recipe_ids).into_iter().collect(),
        }
    }
}
