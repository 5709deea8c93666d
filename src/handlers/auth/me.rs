// handlers/auth/me.rs - GET /auth/me handler

use axum::{Extension, Json};
use serde::Serialize;

use crate::auth::AuthUser;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub username: String,
}

/// GET /auth/me - Echo the authenticated username
pub async fn me(Extension(auth_user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        username: auth_user.username,
    })
}
