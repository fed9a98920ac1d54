use recipebox_core::domain::{
    recipe::{
        entities::{Category, DEFAULT_PORTIONS, Ingredient, Recipe},
        units::DEFAULT_UNIT,
        value_objects::{CreateRecipeInput, RecipeFields, RecipePatch},
    },
    storage::value_objects::ImageUpload,
};

/// Editable copy of a recipe. Discarded on cancel and after a save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub portions: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    /// New image picked in the editor, uploaded on save.
    pub image: Option<ImageUpload>,
}

impl From<&Recipe> for RecipeDraft {
    fn from(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            category: recipe.category,
            portions: recipe.portions,
            ingredients: recipe.ingredients.clone(),
            steps: recipe.steps.clone(),
            image: None,
        }
    }
}

impl RecipeDraft {
    /// Blank form for a new recipe.
    pub fn empty() -> Self {
        Self {
            portions: DEFAULT_PORTIONS,
            ..Default::default()
        }
    }

    /// Appends an empty row measured in grams.
    pub fn add_ingredient(&mut self) {
        self.ingredients.push(Ingredient::new("", "", DEFAULT_UNIT));
    }

    pub fn update_ingredient(&mut self, index: usize, ingredient: Ingredient) -> bool {
        match self.ingredients.get_mut(index) {
            Some(slot) => {
                *slot = ingredient;
                true
            }
            None => false,
        }
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<Ingredient> {
        (index < self.ingredients.len()).then(|| self.ingredients.remove(index))
    }

    pub fn add_step(&mut self) {
        self.steps.push(String::new());
    }

    pub fn update_step(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.steps.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_step(&mut self, index: usize) -> Option<String> {
        (index < self.steps.len()).then(|| self.steps.remove(index))
    }

    pub fn fields(&self) -> RecipeFields {
        RecipeFields {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            portions: self.portions,
            ingredients: self.ingredients.clone(),
            steps: self.steps.clone(),
        }
    }

    /// Every form field as a patch. The image goes through the upload.
    pub fn to_patch(&self) -> RecipePatch {
        RecipePatch::from(self.fields())
    }

    pub fn to_create_input(&self) -> CreateRecipeInput {
        CreateRecipeInput {
            fields: self.fields(),
            image: self.image.clone(),
        }
    }
}
