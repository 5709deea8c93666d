// handlers/auth/delete_user.rs - DELETE /auth/deleteuser/:username handler

use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::api::ApiPath;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// DELETE /auth/deleteuser/:username - Delete the caller's own account
///
/// The path username must match the authenticated user (403 otherwise).
/// The user's items are deleted with the account.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(username): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    state.accounts.delete_user(&auth_user, &username).await?;

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
