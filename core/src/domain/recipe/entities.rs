use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_timestamp},
    recipe::value_objects::{RecipeFields, RecipePatch},
};

/// Amount text meaning "as needed". Never scaled or formatted as a number.
pub const AS_NEEDED: &str = "nach Bedarf";

pub const DEFAULT_PORTIONS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Dessert,
    MainCourse,
    Appetizer,
    Snack,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Dessert,
        Category::MainCourse,
        Category::Appetizer,
        Category::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Dessert => "dessert",
            Category::MainCourse => "main_course",
            Category::Appetizer => "appetizer",
            Category::Snack => "snack",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Dessert => "Dessert",
            Category::MainCourse => "Hauptgericht",
            Category::Appetizer => "Vorspeise",
            Category::Snack => "Snack",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("unknown category '{s}'")))
    }
}

/// Quantity of an ingredient, either a number or free text.
///
/// Text covers decimal strings as typed into the form, the [`AS_NEEDED`]
/// sentinel, and whatever older records contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Quantity(f64),
    Text(String),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Text(String::new())
    }
}

impl Amount {
    pub fn as_needed() -> Self {
        Amount::Text(AS_NEEDED.to_string())
    }

    pub fn is_as_needed(&self) -> bool {
        matches!(self, Amount::Text(text) if text.trim() == AS_NEEDED)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Amount::Text(text) if text.trim().is_empty())
    }

    /// Finite numeric value, if the amount has one.
    pub fn numeric_value(&self) -> Option<f64> {
        let value = match self {
            Amount::Quantity(value) => *value,
            Amount::Text(text) => text.trim().parse::<f64>().ok()?,
        };

        value.is_finite().then_some(value)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Quantity(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

fn nullable_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Amount>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_amount")]
    pub amount: Amount,
    #[serde(default)]
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: impl Into<Amount>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount: amount.into(),
            unit: unit.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub image_url: String,
    pub portions: u32,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(fields: RecipeFields, image_url: String) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            title: fields.title,
            description: fields.description,
            category: fields.category,
            image_url,
            portions: fields.portions,
            ingredients: fields.ingredients,
            steps: fields.steps,
            created_at: now,
            updated_at: now,
        }
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

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Merges the fields set in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: &RecipePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(portions) = patch.portions {
            self.portions = portions;
        }
        if let Some(ingredients) = &patch.ingredients {
            self.ingredients = ingredients.clone();
        }
        if let Some(steps) = &patch.steps {
            self.steps = steps.clone();
        }
        self.updated_at = Utc::now();
    }
}
