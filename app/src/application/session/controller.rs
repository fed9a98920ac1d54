use std::{collections::BTreeSet, sync::Arc, time::Instant};

use futures::join;
use recipebox_core::domain::{
    authentication::{entities::AuthUser, ports::AuthService, value_objects::SignInInput},
    common::entities::app_errors::CoreError,
    favorite::{entities::is_favorite, ports::FavoriteService},
    recipe::{
        entities::{Ingredient, Recipe},
        ports::RecipeService,
        scaling::{BASELINE_PORTIONS, scale_ingredients},
        value_objects::{CreateRecipeInput, UpdateRecipeInput},
    },
    storage::value_objects::ImageUpload,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::{
    draft::RecipeDraft,
    errors::ControllerError,
    identity::SessionIdentity,
    listing::visible_recipes,
    notice::{Notice, UserPrompt},
    view_state::ViewState,
};

pub const DEFAULT_SERVINGS: u32 = 4;

/// Recipe list, detail and editor screens of one session.
///
/// Every transition either succeeds or leaves the state as it was. Failures
/// are raised as a single notice and returned to the caller.
pub struct RecipeListController<S, P> {
    service: Arc<S>,
    prompt: P,
    identity: SessionIdentity,
    recipes: Vec<Recipe>,
    favorites: BTreeSet<Uuid>,
    view: ViewState,
    search: String,
    servings: u32,
    notices: Vec<Notice>,
}

async fn fetch_favorites<S: FavoriteService>(
    service: &S,
    user_id: Option<Uuid>,
) -> Result<BTreeSet<Uuid>, CoreError> {
    match user_id {
        Some(user_id) => service.get_favorites(user_id).await,
        None => Ok(BTreeSet::new()),
    }
}

impl<S, P> RecipeListController<S, P>
where
    S: RecipeService + FavoriteService + AuthService,
    P: UserPrompt,
{
    pub fn new(service: Arc<S>, prompt: P) -> Self {
        Self {
            service,
            prompt,
            identity: SessionIdentity::default(),
            recipes: Vec::new(),
            favorites: BTreeSet::new(),
            view: ViewState::Browsing,
            search: String::new(),
            servings: DEFAULT_SERVINGS,
            notices: Vec::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Loaded recipes in load order.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn favorites(&self) -> &BTreeSet<Uuid> {
        &self.favorites
    }

    pub fn is_favorite(&self, recipe_id: Uuid) -> bool {
        is_favorite(&self.favorites, recipe_id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.identity.current()
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<AuthUser>> {
        self.identity.subscribe()
    }

    pub fn draft(&self) -> Option<&RecipeDraft> {
        self.view.draft()
    }

    pub fn draft_mut(&mut self) -> Option<&mut RecipeDraft> {
        match &mut self.view {
            ViewState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn visible_recipes(&self) -> Vec<&Recipe> {
        visible_recipes(&self.recipes, &self.favorites, &self.search)
    }

    /// Ingredients of the open recipe scaled to the current servings.
    pub fn displayed_ingredients(&self) -> Vec<Ingredient> {
        match &self.view {
            ViewState::Viewing(recipe) => {
                scale_ingredients(&recipe.ingredients, BASELINE_PORTIONS, self.servings)
            }
            _ => Vec::new(),
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn dismiss_expired_notices(&mut self, now: Instant) {
        self.notices.retain(|notice| !notice.is_expired(now));
    }

    fn raise(&mut self, notice: Notice) {
        self.prompt.notify(notice.clone());
        self.notices.push(notice);
    }

    fn report(&mut self, error: &ControllerError) {
        warn!(error = %error, state = self.view.name(), "action failed");
        self.raise(Notice::error(error.to_string()));
    }

    fn fail<T>(&mut self, error: impl Into<ControllerError>) -> Result<T, ControllerError> {
        let error = error.into();
        self.report(&error);
        Err(error)
    }

    fn invalid<T>(&mut self, action: &'static str) -> Result<T, ControllerError> {
        let state = self.view.name();
        self.fail(ControllerError::InvalidTransition { action, state })
    }

    fn require_user(&mut self) -> Result<AuthUser, ControllerError> {
        match self.identity.current() {
            Some(user) => Ok(user),
            None => self.fail(CoreError::Unauthenticated),
        }
    }

    /// Fetches recipes and favorites concurrently. Each failed fetch keeps
    /// its previous snapshot and raises its own notice.
    pub async fn load(&mut self) -> Result<(), ControllerError> {
        let user_id = self.identity.current().map(|user| user.id);

        let (recipes, favorites) = join!(
            self.service.list_recipes(),
            fetch_favorites(self.service.as_ref(), user_id)
        );

        let mut first_error = None;

        match recipes {
            Ok(recipes) => {
                debug!(count = recipes.len(), "recipes loaded");
                self.recipes = recipes;
                self.refresh_selection();
            }
            Err(error) => {
                let error = ControllerError::from(error);
                self.report(&error);
                first_error.get_or_insert(error);
            }
        }

        match favorites {
            Ok(favorites) => self.favorites = favorites,
            Err(error) => {
                let error = ControllerError::from(error);
                self.report(&error);
                first_error.get_or_insert(error);
            }
        }

        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Swaps the open recipe for its reloaded copy. A recipe that is gone
    /// from the reload closes the detail view and any open editor.
    fn refresh_selection(&mut self) {
        let Some(selected) = self.view.selected() else {
            return;
        };
        let selected_id = selected.id;
        let Some(fresh) = self.recipes.iter().find(|r| r.id == selected_id).cloned() else {
            info!(recipe_id = %selected_id, "open recipe no longer exists");
            self.view = ViewState::Browsing;
            self.servings = DEFAULT_SERVINGS;
            self.raise(Notice::info("The open recipe no longer exists"));
            return;
        };

        match &mut self.view {
            ViewState::Viewing(recipe) | ViewState::Editing { recipe, .. } => *recipe = fresh,
            ViewState::Browsing => {}
        }
    }

    pub fn select(&mut self, recipe_id: Uuid) -> Result<(), ControllerError> {
        if !matches!(self.view, ViewState::Browsing) {
            return self.invalid("open a recipe");
        }

        match self.recipes.iter().find(|r| r.id == recipe_id).cloned() {
            Some(recipe) => {
                self.view = ViewState::Viewing(recipe);
                Ok(())
            }
            None => self.fail(ControllerError::UnknownRecipe(recipe_id)),
        }
    }

    pub fn back(&mut self) -> Result<(), ControllerError> {
        if !matches!(self.view, ViewState::Viewing(_)) {
            return self.invalid("go back");
        }

        self.view = ViewState::Browsing;
        self.servings = DEFAULT_SERVINGS;
        Ok(())
    }

    /// Applied when `servings >= 1`, ignored otherwise.
    pub fn change_servings(&mut self, servings: i64) -> Result<(), ControllerError> {
        if !matches!(self.view, ViewState::Viewing(_)) {
            return self.invalid("change servings");
        }

        match u32::try_from(servings) {
            Ok(servings) if servings >= 1 => self.servings = servings,
            _ => debug!(servings, "ignoring serving count below one"),
        }
        Ok(())
    }

    pub fn increment_servings(&mut self) -> Result<(), ControllerError> {
        self.change_servings(i64::from(self.servings) + 1)
    }

    pub fn decrement_servings(&mut self) -> Result<(), ControllerError> {
        self.change_servings(i64::from(self.servings) - 1)
    }

    pub fn edit(&mut self) -> Result<(), ControllerError> {
        let recipe = match &self.view {
            ViewState::Viewing(recipe) => recipe.clone(),
            _ => return self.invalid("edit"),
        };
        self.require_user()?;

        let draft = RecipeDraft::from(&recipe);
        self.view = ViewState::Editing { recipe, draft };
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), ControllerError> {
        let recipe = match &self.view {
            ViewState::Editing { recipe, .. } => recipe.clone(),
            _ => return self.invalid("cancel editing"),
        };

        self.view = ViewState::Viewing(recipe);
        Ok(())
    }

    /// Validates the image before it is kept in the draft.
    pub fn select_image(&mut self, image: ImageUpload) -> Result<(), ControllerError> {
        if self.draft().is_none() {
            return self.invalid("choose an image");
        }
        if let Err(errors) = image.validate() {
            return self.fail(CoreError::from(errors));
        }

        if let Some(draft) = self.draft_mut() {
            draft.image = Some(image);
        }
        Ok(())
    }

    pub fn clear_image(&mut self) {
        if let Some(draft) = self.draft_mut() {
            draft.image = None;
        }
    }

    /// Writes the draft. On success the list entry and the open recipe are
    /// replaced with the merged result.
    pub async fn save(&mut self) -> Result<(), ControllerError> {
        let (recipe, draft) = match &self.view {
            ViewState::Editing { recipe, draft } => (recipe.clone(), draft.clone()),
            _ => return self.invalid("save"),
        };
        self.require_user()?;

        let input = UpdateRecipeInput {
            recipe_id: recipe.id,
            patch: draft.to_patch(),
            image: draft.image,
        };

        let patch = match self.service.update_recipe(input).await {
            Ok(patch) => patch,
            Err(error) => return self.fail(error),
        };

        let mut merged = recipe;
        merged.apply(&patch);

        if let Some(entry) = self.recipes.iter_mut().find(|r| r.id == merged.id) {
            *entry = merged.clone();
        }

        info!(recipe_id = %merged.id, "recipe saved");
        self.view = ViewState::Viewing(merged);
        self.raise(Notice::success("Recipe saved"));
        Ok(())
    }

    /// Asks for confirmation first. Declining changes nothing.
    pub async fn delete(&mut self) -> Result<(), ControllerError> {
        let recipe = match &self.view {
            ViewState::Viewing(recipe) => recipe.clone(),
            _ => return self.invalid("delete"),
        };
        self.require_user()?;

        if !self
            .prompt
            .confirm(&format!("Delete \"{}\"? This cannot be undone.", recipe.title))
        {
            debug!(recipe_id = %recipe.id, "delete declined");
            return Ok(());
        }

        if let Err(error) = self.service.delete_recipe(recipe.id).await {
            return self.fail(error);
        }

        self.recipes.retain(|r| r.id != recipe.id);
        self.view = ViewState::Browsing;
        self.servings = DEFAULT_SERVINGS;
        self.raise(Notice::success("Recipe deleted"));
        Ok(())
    }

    pub async fn toggle_favorite(&mut self, recipe_id: Uuid) -> Result<(), ControllerError> {
        if matches!(self.view, ViewState::Editing { .. }) {
            return self.invalid("change favorites");
        }
        let user = self.require_user()?;

        if self.is_favorite(recipe_id) {
            if let Err(error) = self.service.remove_favorite(user.id, recipe_id).await {
                return self.fail(error);
            }
            self.favorites.remove(&recipe_id);
            self.raise(Notice::info("Removed from favorites"));
        } else {
            if let Err(error) = self.service.add_favorite(user.id, recipe_id).await {
                return self.fail(error);
            }
            self.favorites.insert(recipe_id);
            self.raise(Notice::info("Added to favorites"));
        }

        Ok(())
    }

    /// Creates a recipe from the add-recipe form and appends it to the list.
    pub async fn create_recipe(
        &mut self,
        input: CreateRecipeInput,
    ) -> Result<Recipe, ControllerError> {
        if !matches!(self.view, ViewState::Browsing) {
            return self.invalid("add a recipe");
        }
        self.require_user()?;

        match self.service.create_recipe(input).await {
            Ok(recipe) => {
                self.recipes.push(recipe.clone());
                self.raise(Notice::success("Recipe added"));
                Ok(recipe)
            }
            Err(error) => self.fail(error),
        }
    }

    pub async fn sign_in(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, ControllerError> {
        let user = match self.service.sign_in(SignInInput::new(email, password)).await {
            Ok(user) => user,
            Err(error) => return self.fail(error),
        };

        self.identity.sign_in(user.clone());
        self.favorites.clear();
        self.raise(Notice::success(format!("Signed in as {}", user.email)));

        match self.service.get_favorites(user.id).await {
            Ok(favorites) => self.favorites = favorites,
            Err(error) => self.report(&ControllerError::from(error)),
        }

        Ok(user)
    }

    /// Local only. An open editor is closed without saving.
    pub fn sign_out(&mut self) {
        if self.identity.sign_out().is_none() {
            return;
        }

        self.favorites.clear();
        if let ViewState::Editing { recipe, .. } = &self.view {
            let recipe = recipe.clone();
            self.view = ViewState::Viewing(recipe);
        }

        self.raise(Notice::info("Signed out"));
    }
}
