use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Item, ItemChanges, NewItem, User};

/// Credential store. Only the auth and account layers hold one of these.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    /// Insert a new user. A taken username fails with
    /// `DatabaseError::UniqueViolation`.
    async fn insert(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError>;

    /// Overwrite the stored hash. Fails with `DatabaseError::NotFound` when
    /// the user no longer exists.
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), DatabaseError>;

    /// Delete the user and every item they own. Returns false when no row
    /// matched.
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;
}

/// Owner-scoped record store.
///
/// Every method takes the owner's user id as its first argument; there is
/// no way to reach an item without naming who is asking for it.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn insert(&self, owner_id: i64, item: &NewItem) -> Result<Item, DatabaseError>;

    /// All items of the owner, ordered by id
    async fn list(&self, owner_id: i64) -> Result<Vec<Item>, DatabaseError>;

    async fn find(&self, owner_id: i64, id: i64) -> Result<Option<Item>, DatabaseError>;

    /// Returns `None` when the item is absent or belongs to someone else
    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, DatabaseError>;

    /// Returns false when the item is absent or belongs to someone else
    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, DatabaseError>;
}
