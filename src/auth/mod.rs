use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::database::models::User;
use crate::database::{DatabaseError, UserRepository};

pub mod password;

pub use password::{Argon2Hasher, PasswordHasher};

/// Identity resolved from a successful credential check, carried through the
/// rest of the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user and wrong password are deliberately the same variant
    #[error("Invalid credentials")]
    Unauthenticated,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

/// Checks a username/password pair against the credential store
pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    // Verified against when the username is unknown so both failure paths
    // pay for one argon2 run.
    dummy_hash: String,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, AuthError> {
        let dummy_hash = hasher.hash("timing-equalization-placeholder")?;
        Ok(Self {
            users,
            hasher,
            dummy_hash,
        })
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthUser, AuthError> {
        let user = self.users.find_by_username(username).await?;

        let (stored_hash, candidate) = match &user {
            Some(user) => (user.password_hash.clone(), Some(user)),
            None => (self.dummy_hash.clone(), None),
        };

        let verified =
            password::verify_blocking(self.hasher.clone(), password.to_string(), stored_hash)
                .await?;

        match candidate {
            Some(user) if verified => {
                debug!("Authenticated user {} ({})", user.username, user.id);
                Ok(AuthUser::from(user))
            }
            _ => {
                warn!("Authentication failed for username '{}'", username);
                Err(AuthError::Unauthenticated)
            }
        }
    }
}
