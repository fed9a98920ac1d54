use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use recipebox_core::{
    domain::{
        authentication::ports::HasherRepository,
        common::entities::app_errors::CoreError,
        recipe::{
            entities::{Amount, Category, Ingredient, Recipe},
            ports::RecipeRepository,
            value_objects::{CreateRecipeInput, RecipeFields},
        },
        storage::value_objects::ImageUpload,
    },
    infrastructure::{
        crypto::argon2_hasher::Argon2Hasher,
        memory::{InMemoryBackend, InMemoryService, Port},
    },
};
use test_context::{AsyncTestContext, test_context};

use super::{
    controller::{DEFAULT_SERVINGS, RecipeListController},
    errors::ControllerError,
    notice::{MockUserPrompt, Notice, NoticeLevel},
    view_state::ViewState,
};

const EMAIL: &str = "koch@example.org";
const PASSWORD: &str = "schnitzel";
const OTHER_EMAIL: &str = "bob@example.org";

fn recipe(title: &str, description: &str, ingredients: Vec<Ingredient>) -> Recipe {
    Recipe::new(
        RecipeFields {
            title: title.to_string(),
            description: description.to_string(),
            category: Some(Category::MainCourse),
            portions: 4,
            ingredients,
            steps: vec!["Vorbereiten".to_string(), "Kochen".to_string()],
        },
        String::new(),
    )
}

struct SessionContext {
    backend: InMemoryBackend,
    controller: RecipeListController<InMemoryService, MockUserPrompt>,
    notified: Arc<Mutex<Vec<Notice>>>,
    confirm: Arc<AtomicBool>,
    recipes: Vec<Recipe>,
}

impl AsyncTestContext for SessionContext {
    async fn setup() -> Self {
        let backend = InMemoryBackend::new("https://cdn.test");
        let hasher = Argon2Hasher::low_cost();
        let hash = hasher.hash_password(PASSWORD).await.unwrap();
        backend.seed_user(EMAIL, hash).await;

        let recipes = vec![
            recipe(
                "Tomato Soup",
                "Quick and warm",
                vec![
                    Ingredient::new("Tomaten", "800", "g"),
                    Ingredient::new("Salz", Amount::as_needed(), "Prise"),
                ],
            ),
            recipe(
                "Pancakes",
                "Sunday breakfast",
                vec![Ingredient::new("Mehl", "250", "g")],
            ),
            recipe(
                "Lentil Stew",
                "Hearty, almost a soup",
                vec![Ingredient::new("Linsen", "300", "g")],
            ),
        ];
        backend.seed_recipes(recipes.clone()).await;

        let notified = Arc::new(Mutex::new(Vec::new()));
        let confirm = Arc::new(AtomicBool::new(true));

        let mut prompt = MockUserPrompt::new();
        let sink = Arc::clone(&notified);
        prompt
            .expect_notify()
            .returning(move |notice| sink.lock().unwrap().push(notice));
        let answer = Arc::clone(&confirm);
        prompt
            .expect_confirm()
            .returning(move |_| answer.load(Ordering::SeqCst));

        let controller = RecipeListController::new(Arc::new(backend.service(hasher)), prompt);

        Self {
            backend,
            controller,
            notified,
            confirm,
            recipes,
        }
    }
}

impl SessionContext {
    async fn signed_in_and_loaded(&mut self) {
        self.controller.sign_in(EMAIL, PASSWORD).await.unwrap();
        self.controller.load().await.unwrap();
    }

    fn visible_titles(&self) -> Vec<String> {
        self.controller
            .visible_recipes()
            .iter()
            .map(|r| r.title.clone())
            .collect()
    }

    async fn seed_second_user(&self) {
        let hash = Argon2Hasher::low_cost()
            .hash_password(PASSWORD)
            .await
            .unwrap();
        self.backend.seed_user(OTHER_EMAIL, hash).await;
    }

    fn error_notices(&self) -> usize {
        self.controller
            .notices()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .count()
    }
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_anonymous_load_keeps_load_order(ctx: &mut SessionContext) {
    ctx.controller.load().await.unwrap();

    assert_eq!(
        ctx.visible_titles(),
        vec!["Tomato Soup", "Pancakes", "Lentil Stew"]
    );
    assert!(ctx.controller.favorites().is_empty());
    assert!(ctx.controller.notices().is_empty());
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_search_filters_title_and_description(ctx: &mut SessionContext) {
    ctx.controller.load().await.unwrap();

    ctx.controller.set_search("SOU");

    assert_eq!(ctx.visible_titles(), vec!["Tomato Soup", "Lentil Stew"]);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_failed_load_keeps_snapshot_and_reports_each_fetch(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    ctx.backend.set_unavailable(Port::Recipes, true).await;
    ctx.backend.set_unavailable(Port::Favorites, true).await;

    let result = ctx.controller.load().await;

    assert!(matches!(
        result,
        Err(ControllerError::Core(CoreError::Storage(_)))
    ));
    assert_eq!(ctx.controller.recipes().len(), 3);
    assert_eq!(ctx.error_notices(), 2);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_favorite_moves_to_front_and_back(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let stew = ctx.recipes[2].id;

    ctx.controller.toggle_favorite(stew).await.unwrap();
    assert_eq!(
        ctx.visible_titles(),
        vec!["Lentil Stew", "Tomato Soup", "Pancakes"]
    );
    assert!(ctx.controller.is_favorite(stew));

    ctx.controller.toggle_favorite(stew).await.unwrap();
    assert_eq!(
        ctx.visible_titles(),
        vec!["Tomato Soup", "Pancakes", "Lentil Stew"]
    );
    assert_eq!(ctx.backend.writes(Port::Favorites).await, 2);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_favorites_survive_a_reload(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let pancakes = ctx.recipes[1].id;
    ctx.controller.toggle_favorite(pancakes).await.unwrap();

    ctx.controller.load().await.unwrap();

    assert!(ctx.controller.is_favorite(pancakes));
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_anonymous_user_cannot_favorite(ctx: &mut SessionContext) {
    ctx.controller.load().await.unwrap();

    let result = ctx.controller.toggle_favorite(ctx.recipes[0].id).await;

    assert_eq!(
        result,
        Err(ControllerError::Core(CoreError::Unauthenticated))
    );
    assert!(ctx.controller.favorites().is_empty());
    assert_eq!(ctx.notified.lock().unwrap().len(), 1);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_detail_scales_from_baseline(ctx: &mut SessionContext) {
    ctx.controller.load().await.unwrap();
    ctx.controller.select(ctx.recipes[0].id).unwrap();

    ctx.controller.change_servings(8).unwrap();
    let ingredients = ctx.controller.displayed_ingredients();

    assert_eq!(ingredients[0].amount, Amount::Quantity(1600.0));
    assert_eq!(ingredients[1].amount, Amount::as_needed());
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_servings_below_one_are_ignored(ctx: &mut SessionContext) {
    ctx.controller.load().await.unwrap();
    ctx.controller.select(ctx.recipes[1].id).unwrap();

    ctx.controller.change_servings(0).unwrap();
    ctx.controller.change_servings(-3).unwrap();
    assert_eq!(ctx.controller.servings(), DEFAULT_SERVINGS);

    ctx.controller.change_servings(1).unwrap();
    ctx.controller.decrement_servings().unwrap();
    assert_eq!(ctx.controller.servings(), 1);

    ctx.controller.increment_servings().unwrap();
    assert_eq!(ctx.controller.servings(), 2);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_back_resets_servings(ctx: &mut SessionContext) {
    ctx.controller.load().await.unwrap();
    ctx.controller.select(ctx.recipes[1].id).unwrap();
    ctx.controller.change_servings(10).unwrap();

    ctx.controller.back().unwrap();

    assert_eq!(ctx.controller.view(), &ViewState::Browsing);
    assert_eq!(ctx.controller.servings(), DEFAULT_SERVINGS);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_back_while_browsing_is_rejected(ctx: &mut SessionContext) {
    let result = ctx.controller.back();

    assert_eq!(
        result,
        Err(ControllerError::InvalidTransition {
            action: "go back",
            state: "browsing",
        })
    );
    assert_eq!(ctx.error_notices(), 1);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_edit_requires_sign_in(ctx: &mut SessionContext) {
    ctx.controller.load().await.unwrap();
    ctx.controller.select(ctx.recipes[0].id).unwrap();

    let result = ctx.controller.edit();

    assert_eq!(
        result,
        Err(ControllerError::Core(CoreError::Unauthenticated))
    );
    assert_eq!(ctx.controller.view(), &ViewState::Viewing(ctx.recipes[0].clone()));
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_save_replaces_list_entry_and_selection(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let soup = ctx.recipes[0].id;
    ctx.controller.select(soup).unwrap();
    ctx.controller.edit().unwrap();

    let draft = ctx.controller.draft_mut().unwrap();
    draft.title = "Roasted Tomato Soup".to_string();
    draft.add_step();
    draft.update_step(2, "Servieren");

    ctx.controller.save().await.unwrap();

    let ViewState::Viewing(saved) = ctx.controller.view() else {
        panic!("expected the detail view after saving");
    };
    assert_eq!(saved.title, "Roasted Tomato Soup");
    assert_eq!(saved.steps.len(), 3);
    assert_eq!(ctx.controller.recipes()[0].title, "Roasted Tomato Soup");
    assert_eq!(ctx.backend.recipes().await[0].title, "Roasted Tomato Soup");
    assert_eq!(
        ctx.controller.notices().last().map(|n| n.level),
        Some(NoticeLevel::Success)
    );
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_save_with_new_image_stores_its_url(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    ctx.controller.select(ctx.recipes[1].id).unwrap();
    ctx.controller.edit().unwrap();

    ctx.controller
        .select_image(ImageUpload::new("pancakes.jpg", "image/jpeg", vec![1u8, 2]))
        .unwrap();
    ctx.controller.save().await.unwrap();

    let saved = ctx.controller.view().selected().unwrap();
    assert_eq!(saved.image_url, "https://cdn.test/images/pancakes.jpg");
    assert!(ctx.backend.object("images/pancakes.jpg").await.is_some());
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_invalid_save_stays_in_editor_without_writing(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    ctx.controller.select(ctx.recipes[0].id).unwrap();
    ctx.controller.edit().unwrap();
    ctx.controller.draft_mut().unwrap().steps.clear();

    let result = ctx.controller.save().await;

    assert_eq!(
        result,
        Err(ControllerError::Core(CoreError::Validation(
            "at least one step is required".to_string()
        )))
    );
    assert!(matches!(ctx.controller.view(), ViewState::Editing { .. }));
    assert_eq!(ctx.backend.writes(Port::Recipes).await, 0);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_cancel_discards_draft(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    ctx.controller.select(ctx.recipes[0].id).unwrap();
    ctx.controller.edit().unwrap();
    ctx.controller.draft_mut().unwrap().title = "Verworfen".to_string();

    ctx.controller.cancel().unwrap();

    assert_eq!(ctx.controller.view(), &ViewState::Viewing(ctx.recipes[0].clone()));
    assert!(ctx.controller.draft().is_none());
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_gif_is_rejected_on_selection(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    ctx.controller.select(ctx.recipes[0].id).unwrap();
    ctx.controller.edit().unwrap();

    let result = ctx
        .controller
        .select_image(ImageUpload::new("soup.gif", "image/gif", vec![1u8]));

    assert!(matches!(
        result,
        Err(ControllerError::Core(CoreError::Validation(_)))
    ));
    assert_eq!(ctx.controller.draft().unwrap().image, None);
    assert_eq!(ctx.error_notices(), 1);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_declined_delete_changes_nothing(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    ctx.controller.select(ctx.recipes[2].id).unwrap();
    ctx.confirm.store(false, Ordering::SeqCst);

    ctx.controller.delete().await.unwrap();

    assert!(matches!(ctx.controller.view(), ViewState::Viewing(_)));
    assert_eq!(ctx.backend.recipes().await.len(), 3);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_confirmed_delete_returns_to_list(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let stew = ctx.recipes[2].id;
    ctx.controller.toggle_favorite(stew).await.unwrap();
    ctx.controller.select(stew).unwrap();

    ctx.controller.delete().await.unwrap();

    assert_eq!(ctx.controller.view(), &ViewState::Browsing);
    assert_eq!(ctx.visible_titles(), vec!["Tomato Soup", "Pancakes"]);
    assert_eq!(ctx.backend.recipes().await.len(), 2);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_create_appends_to_list(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;

    let created = ctx
        .controller
        .create_recipe(CreateRecipeInput {
            fields: RecipeFields {
                title: "Apple Pie".to_string(),
                description: "Classic".to_string(),
                category: Some(Category::Dessert),
                portions: 8,
                ingredients: vec![Ingredient::new("Äpfel", "1", "kg")],
                steps: vec!["Backen".to_string()],
            },
            image: None,
        })
        .await
        .unwrap();

    assert_eq!(ctx.controller.recipes().last(), Some(&created));
    assert_eq!(ctx.visible_titles().last().map(String::as_str), Some("Apple Pie"));
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_wrong_password_keeps_session_anonymous(ctx: &mut SessionContext) {
    let result = ctx.controller.sign_in(EMAIL, "spaetzle").await;

    assert_eq!(
        result,
        Err(ControllerError::Core(CoreError::InvalidCredentials))
    );
    assert_eq!(ctx.controller.current_user(), None);
    assert_eq!(ctx.error_notices(), 1);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_sign_out_closes_editor_and_clears_favorites(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let receiver = ctx.controller.subscribe_user();
    ctx.controller.toggle_favorite(ctx.recipes[0].id).await.unwrap();
    ctx.controller.select(ctx.recipes[0].id).unwrap();
    ctx.controller.edit().unwrap();

    ctx.controller.sign_out();

    assert!(matches!(ctx.controller.view(), ViewState::Viewing(_)));
    assert!(ctx.controller.favorites().is_empty());
    assert_eq!(*receiver.borrow(), None);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_switching_user_drops_previous_favorites(ctx: &mut SessionContext) {
    ctx.seed_second_user().await;
    ctx.signed_in_and_loaded().await;
    let soup = ctx.recipes[0].id;
    ctx.controller.toggle_favorite(soup).await.unwrap();
    ctx.backend.set_unavailable(Port::Favorites, true).await;

    let bob = ctx.controller.sign_in(OTHER_EMAIL, PASSWORD).await.unwrap();

    assert_eq!(ctx.controller.current_user(), Some(bob));
    assert!(ctx.controller.favorites().is_empty());
    assert!(!ctx.controller.is_favorite(soup));
    assert_eq!(ctx.error_notices(), 1);

    ctx.backend.set_unavailable(Port::Favorites, false).await;
    ctx.controller.toggle_favorite(soup).await.unwrap();

    assert!(ctx.controller.is_favorite(soup));
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_failed_save_keeps_editor_and_list(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    ctx.controller.select(ctx.recipes[0].id).unwrap();
    ctx.controller.edit().unwrap();
    ctx.controller.draft_mut().unwrap().title = "Roasted Tomato Soup".to_string();
    ctx.backend.set_unavailable(Port::Recipes, true).await;

    let result = ctx.controller.save().await;

    assert!(matches!(
        result,
        Err(ControllerError::Core(CoreError::Storage(_)))
    ));
    let ViewState::Editing { recipe, draft } = ctx.controller.view() else {
        panic!("expected the editor to stay open");
    };
    assert_eq!(recipe, &ctx.recipes[0]);
    assert_eq!(draft.title, "Roasted Tomato Soup");
    assert_eq!(ctx.controller.recipes()[0].title, "Tomato Soup");
    assert_eq!(ctx.error_notices(), 1);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_failed_delete_keeps_recipe_open_and_listed(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let stew = ctx.recipes[2].id;
    ctx.controller.select(stew).unwrap();
    ctx.backend.set_unavailable(Port::Recipes, true).await;

    let result = ctx.controller.delete().await;

    assert!(matches!(
        result,
        Err(ControllerError::Core(CoreError::Storage(_)))
    ));
    assert_eq!(ctx.controller.view(), &ViewState::Viewing(ctx.recipes[2].clone()));
    assert!(ctx.controller.recipes().iter().any(|r| r.id == stew));
    assert_eq!(ctx.error_notices(), 1);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_failed_toggle_keeps_favorites(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let soup = ctx.recipes[0].id;
    let pancakes = ctx.recipes[1].id;
    ctx.controller.toggle_favorite(soup).await.unwrap();
    ctx.backend.set_unavailable(Port::Favorites, true).await;

    assert!(ctx.controller.toggle_favorite(soup).await.is_err());
    assert!(ctx.controller.toggle_favorite(pancakes).await.is_err());

    assert!(ctx.controller.is_favorite(soup));
    assert!(!ctx.controller.is_favorite(pancakes));
    assert_eq!(ctx.error_notices(), 2);
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_reload_closes_recipe_deleted_elsewhere(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let stew = ctx.recipes[2].id;
    ctx.controller.select(stew).unwrap();
    ctx.controller.change_servings(6).unwrap();
    RecipeRepository::delete(&ctx.backend, stew).await.unwrap();

    ctx.controller.load().await.unwrap();

    assert_eq!(ctx.controller.view(), &ViewState::Browsing);
    assert_eq!(ctx.controller.servings(), DEFAULT_SERVINGS);
    assert_eq!(
        ctx.controller.notices().last().map(|n| n.level),
        Some(NoticeLevel::Info)
    );
}

#[test_context(SessionContext)]
#[tokio::test]
async fn test_reload_refreshes_open_recipe(ctx: &mut SessionContext) {
    ctx.signed_in_and_loaded().await;
    let mut pancakes = ctx.recipes[1].clone();
    ctx.controller.select(pancakes.id).unwrap();
    pancakes.title = "Buttermilk Pancakes".to_string();
    RecipeRepository::delete(&ctx.backend, pancakes.id).await.unwrap();
    ctx.backend.seed_recipes([pancakes.clone()]).await;

    ctx.controller.load().await.unwrap();

    assert_eq!(ctx.controller.view(), &ViewState::Viewing(pancakes));
}
