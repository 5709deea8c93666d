// handlers/items/update.rs - PUT /items/:id handler

use axum::{extract::State, Extension, Json};

use crate::api::{ApiJson, ApiPath};
use crate::auth::AuthUser;
use crate::database::models::{Item, ItemChanges};
use crate::error::ApiError;
use crate::state::AppState;

/// PUT /items/:id - Partial update
///
/// Only the fields present in the body are written:
/// ```json
/// { "description": "New Model" }
/// ```
/// leaves `name` and `price` as they were.
pub async fn item_update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(changes): ApiJson<ItemChanges>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.items.update(&auth_user, id, &changes).await?))
}
