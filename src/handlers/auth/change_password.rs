// handlers/auth/change_password.rs - PUT /auth/change-password handler

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::ApiJson;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// PUT /auth/change-password - Replace the caller's password
///
/// Expected Input:
/// ```json
/// { "old_password": "old123", "new_password": "new123" }
/// ```
///
/// The old password is checked again even though the request already
/// authenticated; a mismatch is a 400 "Old password is incorrect".
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .accounts
        .change_password(&auth_user, &payload.old_password, &payload.new_password)
        .await?;

    Ok(Json(json!({ "message": "Password updated successfully" })))
}
