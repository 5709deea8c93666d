pub mod account_service;
pub mod item_service;

pub use account_service::AccountService;
pub use item_service::ItemService;

use crate::auth::AuthError;
use crate::database::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid credentials")]
    Unauthenticated,
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => ServiceError::Unauthenticated,
            AuthError::Hashing(msg) => ServiceError::Internal(msg),
            AuthError::Storage(db) => ServiceError::Database(db),
        }
    }
}
