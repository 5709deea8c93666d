use std::sync::Arc;
use tracing::info;

use crate::auth::password::{hash_blocking, verify_blocking};
use crate::auth::{AuthUser, PasswordHasher};
use crate::database::models::User;
use crate::database::{DatabaseError, UserRepository};

use super::ServiceError;

pub const USERNAME_TAKEN: &str = "Username already exists";

/// Credential lifecycle: signup, password change, self-service delete
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    /// Create a user. The existence check runs before hashing so a taken
    /// name costs no argon2 work; the unique constraint still decides races.
    pub async fn signup(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::Validation(
                "Username and password required".to_string(),
            ));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(ServiceError::Conflict(USERNAME_TAKEN.to_string()));
        }

        let password_hash = hash_blocking(self.hasher.clone(), password.to_string()).await?;

        let user = match self.users.insert(username, &password_hash).await {
            Ok(user) => user,
            Err(DatabaseError::UniqueViolation(_)) => {
                return Err(ServiceError::Conflict(USERNAME_TAKEN.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        info!("Created user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn change_password(
        &self,
        auth_user: &AuthUser,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ServiceError> {
        if new_password.is_empty() {
            return Err(ServiceError::Validation(
                "New password must not be empty".to_string(),
            ));
        }

        // Re-read the row: the hash may have changed since authentication
        let user = self
            .users
            .find_by_id(auth_user.id)
            .await?
            .ok_or(ServiceError::Unauthenticated)?;

        let old_matches = verify_blocking(
            self.hasher.clone(),
            old_password.to_string(),
            user.password_hash,
        )
        .await?;
        if !old_matches {
            return Err(ServiceError::InvalidArgument(
                "Old password is incorrect".to_string(),
            ));
        }

        let new_hash = hash_blocking(self.hasher.clone(), new_password.to_string()).await?;
        match self.users.update_password_hash(auth_user.id, &new_hash).await {
            Ok(()) => {}
            Err(DatabaseError::NotFound(_)) => return Err(ServiceError::Unauthenticated),
            Err(e) => return Err(e.into()),
        }

        info!("Password changed for user {}", auth_user.id);
        Ok(())
    }

    /// Delete the caller's own account. The user's items go with it.
    pub async fn delete_user(&self, auth_user: &AuthUser, username: &str) -> Result<(), ServiceError> {
        if auth_user.username != username {
            return Err(ServiceError::Forbidden(
                "You can only delete your own account".to_string(),
            ));
        }

        if !self.users.delete(auth_user.id).await? {
            return Err(ServiceError::NotFound("User not found".to_string()));
        }

        info!("Deleted user {} ({})", auth_user.username, auth_user.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Argon2Hasher, Authenticator};
    use crate::database::MemoryStore;

    struct Fixture {
        accounts: AccountService,
        auth: Authenticator,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new(8, 1, 1).unwrap());
        Fixture {
            accounts: AccountService::new(store.clone(), hasher.clone()),
            auth: Authenticator::new(store, hasher).unwrap(),
        }
    }

    #[tokio::test]
    async fn signup_rejects_duplicates_regardless_of_password() {
        let f = fixture();
        f.accounts.signup("alice", "pw1").await.unwrap();

        let err = f.accounts.signup("alice", "other").await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == USERNAME_TAKEN));
    }

    /// Store whose lookup never sees the row a concurrent signup just wrote
    struct RacingStore;

    #[async_trait::async_trait]
    impl UserRepository for RacingStore {
        async fn find_by_username(&self, _username: &str) -> Result<Option<User>, DatabaseError> {
            Ok(None)
        }

        async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DatabaseError> {
            Ok(None)
        }

        async fn insert(&self, _username: &str, _password_hash: &str) -> Result<User, DatabaseError> {
            Err(DatabaseError::UniqueViolation("users_username_key".to_string()))
        }

        async fn update_password_hash(&self, id: i64, _password_hash: &str) -> Result<(), DatabaseError> {
            Err(DatabaseError::NotFound(format!("user {}", id)))
        }

        async fn delete(&self, _id: i64) -> Result<bool, DatabaseError> {
            Ok(false)
        }
    }

    #[tokio::test]
    async fn unique_violation_on_insert_is_a_conflict() {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new(8, 1, 1).unwrap());
        let accounts = AccountService::new(Arc::new(RacingStore), hasher);

        let err = accounts.signup("alice", "pw1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == USERNAME_TAKEN));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_signups_admit_exactly_one() {
        let f = fixture();
        let accounts = Arc::new(f.accounts);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let accounts = accounts.clone();
                tokio::spawn(async move { accounts.signup("alice", &format!("pw{}", i)).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(ServiceError::Conflict(m)) => assert_eq!(m, USERNAME_TAKEN),
                Err(other) => panic!("unexpected signup error: {:?}", other),
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn signup_requires_both_fields() {
        let f = fixture();
        assert!(matches!(
            f.accounts.signup("", "pw1").await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            f.accounts.signup("alice", "").await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_plaintext() {
        let f = fixture();
        let user = f.accounts.signup("alice", "pw1").await.unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn change_password_round_trip() {
        let f = fixture();
        f.accounts.signup("alice", "old").await.unwrap();
        let alice = f.auth.authenticate("alice", "old").await.unwrap();

        f.accounts.change_password(&alice, "old", "new").await.unwrap();

        assert!(f.auth.authenticate("alice", "new").await.is_ok());
        assert!(f.auth.authenticate("alice", "old").await.is_err());
    }

    #[tokio::test]
    async fn change_password_with_wrong_old_password() {
        let f = fixture();
        f.accounts.signup("alice", "old").await.unwrap();
        let alice = f.auth.authenticate("alice", "old").await.unwrap();

        let err = f.accounts.change_password(&alice, "wrong", "new").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(ref m) if m == "Old password is incorrect"));
        assert!(f.auth.authenticate("alice", "old").await.is_ok());
    }

    #[tokio::test]
    async fn delete_user_only_self() {
        let f = fixture();
        f.accounts.signup("alice", "pw1").await.unwrap();
        f.accounts.signup("bob", "pw2").await.unwrap();
        let alice = f.auth.authenticate("alice", "pw1").await.unwrap();

        let err = f.accounts.delete_user(&alice, "bob").await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert!(f.auth.authenticate("bob", "pw2").await.is_ok());

        f.accounts.delete_user(&alice, "alice").await.unwrap();
        assert!(f.auth.authenticate("alice", "pw1").await.is_err());
    }
}
