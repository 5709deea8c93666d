// PostgreSQL-backed repositories. All statements are parameterized and
// every mutation is a single statement.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{Item, ItemChanges, NewItem, User};
use crate::database::repository::{ItemRepository, UserRepository};

const USER_COLUMNS: &str = "id, username, password_hash";
const ITEM_COLUMNS: &str = "id, name, description, price, owner_id";

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(manager: &DatabaseManager) -> Self {
        Self {
            pool: manager.pool().clone(),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn insert(&self, username: &str, password_hash: &str) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::classify)
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        // items.owner_id is ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(manager: &DatabaseManager) -> Self {
        Self {
            pool: manager.pool().clone(),
        }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn insert(&self, owner_id: i64, item: &NewItem) -> Result<Item, DatabaseError> {
        let sql = format!(
            "INSERT INTO items (name, description, price, owner_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            ITEM_COLUMNS
        );
        let row = sqlx::query_as::<_, Item>(&sql)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(DatabaseError::classify)?;
        Ok(row)
    }

    async fn list(&self, owner_id: i64) -> Result<Vec<Item>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM items WHERE owner_id = $1 ORDER BY id",
            ITEM_COLUMNS
        );
        let rows = sqlx::query_as::<_, Item>(&sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, owner_id: i64, id: i64) -> Result<Option<Item>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM items WHERE id = $1 AND owner_id = $2",
            ITEM_COLUMNS
        );
        let row = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        owner_id: i64,
        id: i64,
        changes: &ItemChanges,
    ) -> Result<Option<Item>, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE items SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price)
            WHERE id = $1 AND owner_id = $2
            RETURNING {}
            "#,
            ITEM_COLUMNS
        );
        let row = sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .bind(owner_id)
            .bind(changes.name.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.price)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, owner_id: i64, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
