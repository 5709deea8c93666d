use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row from the `items` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub owner_id: i64,
}

/// Fields supplied when creating an item. All are required.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub price: i64,
}

/// Partial update: only `Some` fields overwrite the stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
}

impl ItemChanges {
    /// Apply the supplied fields to an item in place
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = description.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
    }
}
