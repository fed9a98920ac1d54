use chrono::Utc;
use sea_orm::ActiveValue::Set;
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::{
        entities::{Category, DEFAULT_PORTIONS, Recipe},
        value_objects::RecipePatch,
    },
};
use crate::entity::recipes::{ActiveModel as RecipeActiveModel, Model as RecipeModel};
use crate::infrastructure::json_list;

impl From<&RecipeModel> for Recipe {
    fn from(model: &RecipeModel) -> Self {
        Self {
            id: model.id,
            title: model.title.clone(),
            description: model.description.clone(),
            category: model
                .category
                .as_deref()
                .and_then(|category| category.parse::<Category>().ok()),
            image_url: model.image_url.clone(),
            portions: model
                .portions
                .and_then(|portions| u32::try_from(portions).ok())
                .filter(|portions| *portions > 0)
                .unwrap_or(DEFAULT_PORTIONS),
            ingredients: json_list(&model.ingredients),
            steps: json_list(&model.steps),
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, CoreError> {
    serde_json::to_value(value).map_err(|e| {
        error!("Failed to serialize recipe column: {}", e);
        CoreError::Storage("could not encode recipe".to_string())
    })
}

fn to_portions(portions: u32) -> i32 {
    i32::try_from(portions).unwrap_or(i32::MAX)
}

pub fn to_active_model(recipe: &Recipe) -> Result<RecipeActiveModel, CoreError> {
    Ok(RecipeActiveModel {
        id: Set(recipe.id),
        title: Set(recipe.title.clone()),
        description: Set(recipe.description.clone()),
        category: Set(recipe.category.map(|c| c.as_str().to_string())),
        image_url: Set(recipe.image_url.clone()),
        portions: Set(Some(to_portions(recipe.portions))),
        ingredients: Set(to_json(&recipe.ingredients)?),
        steps: Set(to_json(&recipe.steps)?),
        created_at: Set(recipe.created_at.fixed_offset()),
        updated_at: Set(recipe.updated_at.fixed_offset()),
    })
}

/// Active model with only the patched columns set.
pub fn patch_to_active_model(patch: &RecipePatch) -> Result<RecipeActiveModel, CoreError> {
    let mut model = RecipeActiveModel {
        updated_at: Set(Utc::now().fixed_offset()),
        ..Default::default()
    };

    if let Some(title) = &patch.title {
        model.title = Set(title.clone());
    }
    if let Some(description) = &patch.description {
        model.description = Set(description.clone());
    }
    if let Some(category) = patch.category {
        model.category = Set(category.map(|c| c.as_str().to_string()));
    }
    if let Some(image_url) = &patch.image_url {
        model.image_url = Set(image_url.clone());
    }
    if let Some(portions) = patch.portions {
        model.portions = Set(Some(to_portions(portions)));
    }
    if let Some(ingredients) = &patch.ingredients {
        model.ingredients = Set(to_json(ingredients)?);
    }
    if let Some(steps) = &patch.steps {
        model.steps = Set(to_json(steps)?);
    }

    Ok(model)
}
