use std::sync::Arc;

use crate::auth::AuthUser;
use crate::database::models::{Item, ItemChanges, NewItem};
use crate::database::ItemRepository;

use super::ServiceError;

pub const ITEM_NOT_FOUND: &str = "Item not found";

/// Item CRUD on behalf of an authenticated owner.
///
/// Absent and foreign items are indistinguishable: both are `NotFound`.
pub struct ItemService {
    items: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(items: Arc<dyn ItemRepository>) -> Self {
        Self { items }
    }

    pub async fn create(&self, owner: &AuthUser, item: &NewItem) -> Result<Item, ServiceError> {
        Ok(self.items.insert(owner.id, item).await?)
    }

    pub async fn list(&self, owner: &AuthUser) -> Result<Vec<Item>, ServiceError> {
        Ok(self.items.list(owner.id).await?)
    }

    pub async fn get(&self, owner: &AuthUser, id: i64) -> Result<Item, ServiceError> {
        self.items.find(owner.id, id).await?.ok_or_else(not_found)
    }

    pub async fn update(
        &self,
        owner: &AuthUser,
        id: i64,
        changes: &ItemChanges,
    ) -> Result<Item, ServiceError> {
        self.items
            .update(owner.id, id, changes)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, owner: &AuthUser, id: i64) -> Result<(), ServiceError> {
        if self.items.delete(owner.id, id).await? {
            Ok(())
        } else {
            Err(not_found())
        }
    }
}

fn not_found() -> ServiceError {
    ServiceError::NotFound(ITEM_NOT_FOUND.to_string())
}
