use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::domain::{
    recipe::{
        entities::{Category, DEFAULT_PORTIONS, Ingredient},
        validation::{
            invalid, validate_description, validate_ingredients, validate_steps, validate_title,
        },
    },
    storage::value_objects::ImageUpload,
};

/// Every user-editable field of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecipeFields {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    #[validate(custom(function = "validate_description"))]
    pub description: String,

    #[serde(default)]
    pub category: Option<Category>,

    #[validate(range(min = 1, message = "portions must be at least 1"))]
    #[serde(default = "default_portions")]
    pub portions: u32,

    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: Vec<Ingredient>,

    #[validate(custom(function = "validate_steps"))]
    pub steps: Vec<String>,
}

fn default_portions() -> u32 {
    DEFAULT_PORTIONS
}

/// Partial update. `None` leaves the stored field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Option<Category>>,
    pub image_url: Option<String>,
    pub portions: Option<u32>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub steps: Option<Vec<String>>,
}

impl RecipePatch {
    pub fn is_empty(&self) -> bool {
        self == &RecipePatch::default()
    }
}

impl From<RecipeFields> for RecipePatch {
    fn from(fields: RecipeFields) -> Self {
        Self {
            title: Some(fields.title),
            description: Some(fields.description),
            category: Some(fields.category),
            image_url: None,
            portions: Some(fields.portions),
            ingredients: Some(fields.ingredients),
            steps: Some(fields.steps),
        }
    }
}

// Same rules as `RecipeFields`, applied only to the fields present.
impl Validate for RecipePatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(title) = &self.title
            && let Err(error) = validate_title(title)
        {
            errors.add("title", error);
        }

        if let Some(description) = &self.description
            && let Err(error) = validate_description(description)
        {
            errors.add("description", error);
        }

        if self.portions == Some(0) {
            errors.add("portions", invalid("range", "portions must be at least 1"));
        }

        if let Some(ingredients) = &self.ingredients
            && let Err(error) = validate_ingredients(ingredients)
        {
            errors.add("ingredients", error);
        }

        if let Some(steps) = &self.steps
            && let Err(error) = validate_steps(steps)
        {
            errors.add("steps", error);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRecipeInput {
    pub fields: RecipeFields,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone)]
pub struct UpdateRecipeInput {
    pub recipe_id: Uuid,
    pub patch: RecipePatch,
    /// Replaces the stored image when set; its URL overrides `patch.image_url`.
    pub image: Option<ImageUpload>,
}
