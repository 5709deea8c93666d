use std::sync::Arc;

use crate::auth::{AuthError, Authenticator, PasswordHasher};
use crate::database::{
    DatabaseManager, ItemRepository, MemoryStore, PgItemRepository, PgUserRepository,
    UserRepository,
};
use crate::services::{AccountService, ItemService};

/// Shared handler state. Cheap to clone; everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
    pub accounts: Arc<AccountService>,
    pub items: Arc<ItemService>,
    /// Present only for the PostgreSQL backend; drives `/health`
    pub database: Option<DatabaseManager>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        items: Arc<dyn ItemRepository>,
        hasher: Arc<dyn PasswordHasher>,
        database: Option<DatabaseManager>,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            authenticator: Arc::new(Authenticator::new(users.clone(), hasher.clone())?),
            accounts: Arc::new(AccountService::new(users, hasher)),
            items: Arc::new(ItemService::new(items)),
            database,
        })
    }

    pub fn postgres(
        database: DatabaseManager,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, AuthError> {
        let users = Arc::new(PgUserRepository::new(&database));
        let items = Arc::new(PgItemRepository::new(&database));
        Self::new(users, items, hasher, Some(database))
    }

    pub fn memory(hasher: Arc<dyn PasswordHasher>) -> Result<Self, AuthError> {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, hasher, None)
    }
}
