use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Stored login of a user. Never leaves the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub user: AuthUser,
    pub password_hash: String,
}
