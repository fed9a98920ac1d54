use tracing::{info, instrument, warn};
use validator::Validate;

use crate::domain::{
    authentication::{
        entities::AuthUser,
        ports::{AuthService, HasherRepository, UserRepository},
        value_objects::SignInInput,
    },
    common::{entities::app_errors::CoreError, services::Service},
    favorite::ports::FavoritesRepository,
    recipe::ports::RecipeRepository,
    storage::ports::ObjectStoragePort,
};

impl<RR, FR, U, H, OS> AuthService for Service<RR, FR, U, H, OS>
where
    RR: RecipeRepository,
    FR: FavoritesRepository,
    U: UserRepository,
    H: HasherRepository,
    OS: ObjectStoragePort,
{
    #[instrument(skip(self, input))]
    async fn sign_in(&self, input: SignInInput) -> Result<AuthUser, CoreError> {
        let input = SignInInput::new(input.normalized_email(), input.password);
        input.validate()?;

        let Some(credential) = self.user_repository.get_by_email(&input.email).await?
        else {
            warn!("sign-in with unknown email");
            return Err(CoreError::InvalidCredentials);
        };

        let verified = self
            .hasher_repository
            .verify_password(&input.password, &credential.password_hash)
            .await?;

        if !verified {
            warn!(user_id = %credential.user.id, "sign-in with wrong password");
            return Err(CoreError::InvalidCredentials);
        }

        info!(user_id = %credential.user.id, "user signed in");
        Ok(credential.user)
    }
}
