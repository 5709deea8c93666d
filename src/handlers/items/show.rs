// handlers/items/show.rs - GET /items/:id handler

use axum::{extract::State, Extension, Json};

use crate::api::ApiPath;
use crate::auth::AuthUser;
use crate::database::models::Item;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /items/:id - Single item, or 404 if absent or not the caller's
pub async fn item_show(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Item>, ApiError> {
    Ok(Json(state.items.get(&auth_user, id).await?))
}
