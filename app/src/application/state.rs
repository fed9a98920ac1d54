use std::sync::Arc;

use recipebox_core::{
    application::{RecipeboxService, create_service},
    domain::common::RecipeboxConfig,
};

use crate::{
    application::{
        session::{controller::RecipeListController, notice::UserPrompt},
        telemetry::init_logger,
    },
    args::Args,
};

pub type RecipeboxController<P> = RecipeListController<RecipeboxService, P>;

/// Connects the backends described by `args` and builds an empty session.
pub async fn controller<P: UserPrompt>(
    args: Args,
    prompt: P,
) -> Result<RecipeboxController<P>, anyhow::Error> {
    let config = RecipeboxConfig::from(args);
    let service = create_service(config).await?;

    Ok(RecipeListController::new(Arc::new(service), prompt))
}

/// Reads the environment, installs logging and builds the session.
pub async fn bootstrap<P: UserPrompt>(prompt: P) -> Result<RecipeboxController<P>, anyhow::Error> {
    let args = Args::from_env()?;
    init_logger(&args.log)?;

    tracing::info!(
        database_host = %args.database.host,
        bucket = %args.object_storage.bucket,
        "starting recipebox session"
    );

    controller(args, prompt).await
}
