use std::future::Future;

use crate::domain::{
    authentication::{
        entities::{AuthUser, UserCredential},
        value_objects::SignInInput,
    },
    common::entities::app_errors::CoreError,
};

pub trait UserRepository: Send + Sync {
    /// `email` is already normalized.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Option<UserCredential>, CoreError>> + Send;
}

pub trait HasherRepository: Send + Sync {
    fn hash_password(
        &self,
        password: &str,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> impl Future<Output = Result<bool, CoreError>> + Send;
}

pub trait AuthService: Send + Sync {
    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    fn sign_in(
        &self,
        input: SignInInput,
    ) -> impl Future<Output = Result<AuthUser, CoreError>> + Send;
}
