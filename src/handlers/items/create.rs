// handlers/items/create.rs - POST /items/ handler

use axum::{extract::State, Extension, Json};

use crate::api::ApiJson;
use crate::auth::AuthUser;
use crate::database::models::{Item, NewItem};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /items/ - Create an item owned by the caller
///
/// Expected Input:
/// ```json
/// { "name": "Laptop", "description": "Gaming", "price": 1200 }
/// ```
///
/// Expected Output:
/// ```json
/// { "id": 1, "name": "Laptop", "description": "Gaming", "price": 1200, "owner_id": 1 }
/// ```
pub async fn item_create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<NewItem>,
) -> Result<Json<Item>, ApiError> {
    let item = state.items.create(&auth_user, &payload).await?;
    tracing::debug!("User {} created item {}", auth_user.id, item.id);
    Ok(Json(item))
}
