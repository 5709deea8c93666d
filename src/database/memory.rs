// In-process storage backend. Mirrors the PostgreSQL schema semantics:
// serial ids starting at 1, unique usernames, cascade from users to items.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Item, ItemChanges, NewItem, User};
use crate::database::repository::{ItemRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    items: BTreeMap<i64, Item>,
    next_user_id: i64,
    next_item_id: i64,
}

impl Tables {
    fn allocate_user_id(&mut self) -> i64 {
        self.next_user_id += 1;
        self.next_user_id
    }

    fn allocate_item_id(&mut self) -> i64 {
        self.next_item_id += 1;
        self.next_item_id
    }
}

/// Shared handle; clones see the same tables
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn insert(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.username == username) {
            return Err(DatabaseError::UniqueViolation("users_username_key".to_string()));
        }

        let user = User {
            id: tables.allocate_user_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(DatabaseError::NotFound(format!("user {}", id))),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.items.retain(|_, item| item.owner_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ItemRepository for MemoryStore {
    async fn insert(&self, owner_id: i64, item: &NewItem) -> Result<Item, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&owner_id) {
            return Err(DatabaseError::ForeignKeyViolation("items_owner_id_fkey".to_string()));
        }

        let row = Item {
            id: tables.allocate_item_id(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            owner_id,
        };
        tables.items.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list(&self, owner_id: i64) -> Result<Vec<Item>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .values()
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find(&self, owner_id: i64, id: i64) -> Result<Option<Item>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .items
            .get(&id)
            .filter(|item| item.owner_id == owner_id)
            .cloned())
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.items.get_mut(&id) {
            Some(item) if item.owner_id == owner_id => {
                changes.apply_to(item);
                Ok(Some(item.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .items
            .get(&id)
            .map_or(false, |item| item.owner_id == owner_id);
        if owned {
            tables.items.remove(&id);
        }
        Ok(owned)
    }
}
