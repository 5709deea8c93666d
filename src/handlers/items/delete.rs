// handlers/items/delete.rs - DELETE /items/:id handler

use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::api::ApiPath;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// DELETE /items/:id - Remove one of the caller's items
pub async fn item_delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Value>, ApiError> {
    state.items.delete(&auth_user, id).await?;
    tracing::debug!("User {} deleted item {}", auth_user.id, id);
    Ok(Json(json!({ "message": "Item deleted successfully" })))
}
