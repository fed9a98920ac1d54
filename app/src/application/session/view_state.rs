use recipebox_core::domain::recipe::entities::Recipe;

use super::draft::RecipeDraft;

/// What the screen shows. Editing always carries the recipe it edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Browsing,
    Viewing(Recipe),
    Editing { recipe: Recipe, draft: RecipeDraft },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Browsing => "browsing",
            ViewState::Viewing(_) => "viewing",
            ViewState::Editing { .. } => "editing",
        }
    }

    pub fn selected(&self) -> Option<&Recipe> {
        match self {
            ViewState::Browsing => None,
            ViewState::Viewing(recipe) | ViewState::Editing { recipe, .. } => Some(recipe),
        }
    }

    pub fn draft(&self) -> Option<&RecipeDraft> {
        match self {
            ViewState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }
}
