// handlers/items/list.rs - GET /items/ handler

use axum::{extract::State, Extension, Json};

use crate::auth::AuthUser;
use crate::database::models::Item;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /items/ - All items owned by the caller, in creation order
pub async fn item_list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<Vec<Item>>, ApiError> {
    Ok(Json(state.items.list(&auth_user).await?))
}
